use anyhow::{Context, Result};
use clap::Args;

use crate::config::WarehouseSettings;
use crate::questions::all_question_ids;
use crate::render::text::render_report;
use crate::report::{DashboardReport, QuestionSection};
use crate::warehouse::Warehouse;

#[derive(Debug, Clone, Args)]
pub struct DashboardArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &DashboardArgs, settings: &WarehouseSettings) -> Result<()> {
    let mut warehouse = Warehouse::new(settings.clone());
    let report = build_report(&mut warehouse)?;
    if args.json {
        println!("{}", render_json_report(&report)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

pub fn build_report(warehouse: &mut Warehouse) -> Result<DashboardReport> {
    let mut sections = Vec::new();
    for question in all_question_ids() {
        sections.push(QuestionSection::from_fetch(warehouse, question)?);
    }
    Ok(DashboardReport::new(warehouse.settings(), sections))
}

pub fn render_json_report(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to encode dashboard report as JSON")
}
