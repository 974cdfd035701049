use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::config::WarehouseSettings;
use crate::questions::all_question_ids;
use crate::warehouse::{Warehouse, all_catalog_queries, view_exists, view_row_count};

#[derive(Debug, Clone, Args)]
pub struct ProbeArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub database: String,
    pub schema: String,
    pub views: Vec<ViewProbe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewProbe {
    pub view: String,
    pub present: bool,
    pub row_count: Option<u64>,
    pub questions: Vec<u8>,
}

pub fn probe_warehouse(warehouse: &mut Warehouse) -> Result<ProbeReport> {
    let database = warehouse.settings().database.display().to_string();
    let schema = warehouse.settings().schema.clone();
    let connection = warehouse.connection()?;

    let mut views = Vec::new();
    for query in all_catalog_queries() {
        let view = query.view_name();
        let present = view_exists(connection, &schema, view)?;
        let row_count = if present {
            Some(view_row_count(connection, &schema, view)?)
        } else {
            None
        };
        views.push(ViewProbe {
            view: view.to_string(),
            present,
            row_count,
            questions: all_question_ids()
                .into_iter()
                .filter(|question| question.source_query() == query)
                .map(|question| question.number())
                .collect(),
        });
    }

    Ok(ProbeReport {
        database,
        schema,
        views,
    })
}

#[must_use]
pub fn render_text_report(report: &ProbeReport) -> String {
    let mut lines = vec![
        format!("database: {}", report.database),
        format!("schema: {}", report.schema),
    ];

    for view in &report.views {
        let rows = view
            .row_count
            .map_or_else(|| "none".to_string(), |count| count.to_string());
        let questions = view
            .questions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        lines.push(format!(
            "- view={} present={} rows={rows} questions={questions}",
            view.view, view.present
        ));
    }

    lines.join("\n")
}

pub fn render_json_report(report: &ProbeReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to encode probe report as JSON")
}

pub fn run(args: &ProbeArgs, settings: &WarehouseSettings) -> Result<()> {
    let mut warehouse = Warehouse::new(settings.clone());
    let report = probe_warehouse(&mut warehouse)?;
    if args.json {
        println!("{}", render_json_report(&report)?);
    } else {
        println!("{}", render_text_report(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::path::PathBuf;

    fn memory_warehouse(setup_sql: &str) -> Warehouse {
        let connection = Connection::open_in_memory().expect("in-memory sqlite should open");
        connection
            .execute_batch(setup_sql)
            .expect("fixture schema should apply");
        Warehouse::with_connection(
            WarehouseSettings {
                database: PathBuf::from("/data/catalog.db"),
                schema: "main".to_string(),
            },
            connection,
        )
    }

    #[test]
    fn probes_every_upstream_view() {
        let mut warehouse = memory_warehouse(
            "CREATE TABLE q1 (brand TEXT);
             INSERT INTO q1 VALUES ('atma'), ('liliana');",
        );

        let report = probe_warehouse(&mut warehouse).expect("probe should succeed");

        assert_eq!(report.views.len(), 5);
        let q1 = &report.views[0];
        assert_eq!(q1.view, "q1");
        assert!(q1.present);
        assert_eq!(q1.row_count, Some(2));
        assert_eq!(q1.questions, vec![1]);

        let q3567 = report
            .views
            .iter()
            .find(|view| view.view == "q3567")
            .expect("q3567 should be probed");
        assert!(!q3567.present);
        assert_eq!(q3567.row_count, None);
        assert_eq!(q3567.questions, vec![3, 5, 6, 7]);
    }

    #[test]
    fn text_report_marks_missing_views() {
        let mut warehouse = memory_warehouse("CREATE TABLE q4 (brand TEXT);");
        let report = probe_warehouse(&mut warehouse).expect("probe should succeed");

        let rendered = render_text_report(&report);
        assert!(rendered.contains("- view=q4 present=true rows=0 questions=4"));
        assert!(rendered.contains("- view=q8 present=false rows=none questions=8"));
    }
}
