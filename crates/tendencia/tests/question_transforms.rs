use std::path::PathBuf;

use rusqlite::Connection;
use tendencia::config::WarehouseSettings;
use tendencia::questions::{FactValue, QuestionId, QuestionStatus, transform};
use tendencia::render::Artifact;
use tendencia::warehouse::Warehouse;

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

fn run_question(warehouse: &mut Warehouse, question: QuestionId) -> tendencia::questions::QuestionReport {
    let table = warehouse
        .fetch(question.source_query())
        .expect("fixture view should fetch");
    transform(question, &table)
}

#[test]
fn fan_brand_leader_counts_listings_per_brand() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q1 (brand TEXT);
         INSERT INTO q1 VALUES
           ('liliana'), ('ken brown'), ('liliana'), ('atma'), ('liliana'), ('ken brown');",
    );

    let report = run_question(&mut warehouse, QuestionId::FanBrandLeader);

    assert_eq!(report.status, QuestionStatus::Ok);
    let Artifact::BarChart(chart) = &report.artifacts[0] else {
        panic!("first artifact should be the bar chart");
    };
    let observed: Vec<(&str, f64)> = chart
        .bars
        .iter()
        .map(|bar| (bar.label.as_str(), bar.value))
        .collect();
    assert_eq!(
        observed,
        vec![("liliana", 3.0), ("ken brown", 2.0), ("atma", 1.0)]
    );
    assert!(chart.bars.iter().all(|bar| bar.color == "#084063"));

    let headline = report.headline.expect("leader fact should exist");
    assert_eq!(headline.sentence, "The best selling fan brand is liliana.");
}

#[test]
fn air_fryer_ranking_is_contiguous_after_filtering() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q2 (name TEXT);
         INSERT INTO q2 VALUES
           ('name'), ('moulinex easy fry'), (NULL), ('philips airfryer'), ('atma constelacion');",
    );

    let report = run_question(&mut warehouse, QuestionId::AirFryerRanking);

    let Artifact::Table(table) = &report.artifacts[0] else {
        panic!("first artifact should be the ranking table");
    };
    assert_eq!(table.columns, vec!["ranking", "name"]);
    assert_eq!(
        table.rows,
        vec![
            vec!["1".to_string(), "moulinex easy fry".to_string()],
            vec!["2".to_string(), "philips airfryer".to_string()],
            vec!["3".to_string(), "atma constelacion".to_string()],
        ]
    );
    let highlight_colors: Vec<&str> = table
        .highlights
        .iter()
        .map(|highlight| highlight.color.as_str())
        .collect();
    assert_eq!(highlight_colors, vec!["#fec749", "#8abe50", "#00b0bc"]);

    let headline = report.headline.expect("ranking fact should exist");
    assert_eq!(
        headline.sentence,
        "The best selling air fryer model is moulinex easy fry."
    );
}

#[test]
fn level_distribution_orders_slices_by_relative_weight() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q3567 (name TEXT, highlight_score REAL, sale_fee_amount REAL, valor_relativo REAL);
         INSERT INTO q3567 VALUES
           ('clasica', 50.0, 10.0, 0.2),
           ('premium', 80.0, 40.0, 0.5),
           ('gratuita', 10.0, 0.0, 0.0),
           ('destacada', 60.0, 25.0, 0.3);",
    );

    let report = run_question(&mut warehouse, QuestionId::LevelDistribution);

    let Artifact::PieChart(chart) = &report.artifacts[0] else {
        panic!("first artifact should be the pie chart");
    };
    let observed: Vec<(&str, f64, &str)> = chart
        .slices
        .iter()
        .map(|slice| (slice.label.as_str(), slice.value, slice.color.as_str()))
        .collect();
    assert_eq!(
        observed,
        vec![
            ("premium", 0.5, "#3e873c"),
            ("destacada", 0.3, "#fec749"),
            ("clasica", 0.2, "#ec6825"),
        ]
    );
    assert!(report.headline.is_none());
}

#[test]
fn exposure_questions_reuse_one_fetch() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q3567 (name TEXT, highlight_score REAL, sale_fee_amount REAL, valor_relativo REAL);
         INSERT INTO q3567 VALUES
           ('clasica', 50.0, 10.0, 0.2),
           ('premium', 80.0, 40.0, 0.5);",
    );

    for question in [
        QuestionId::LevelDistribution,
        QuestionId::VisibilityCostRatio,
        QuestionId::HighExposureInvestment,
        QuestionId::AverageVisibility,
    ] {
        let report = run_question(&mut warehouse, question);
        assert_eq!(report.status, QuestionStatus::Ok, "question {question:?}");
    }

    assert_eq!(warehouse.cached_query_count(), 1);
}

#[test]
fn integer_scores_and_fees_coerce_to_numbers() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q3567 (name TEXT, highlight_score INTEGER, sale_fee_amount INTEGER, valor_relativo REAL);
         INSERT INTO q3567 VALUES
           ('clasica', 2, 100, 0.1),
           ('premium', 4, 200, 0.2),
           ('oro', 6, 900, 0.3),
           ('platino', 8, 400, 0.4);",
    );

    let report = run_question(&mut warehouse, QuestionId::HighExposureInvestment);

    let headline = report.headline.expect("investment fact should exist");
    assert_eq!(headline.value, FactValue::Text("oro".to_string()));
    assert_eq!(
        headline.sentence,
        "oro requires the highest investment (900) to reach high exposure (threshold 5.00)."
    );
}

#[test]
fn visibility_ratio_skips_unpriced_levels() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q3567 (name TEXT, highlight_score REAL, sale_fee_amount REAL, valor_relativo REAL);
         INSERT INTO q3567 VALUES
           ('gratuita', 1000.0, 0.0, 0.0),
           ('clasica', 5.0, 1.0, 0.2),
           ('premium', 9.0, 1.0, 0.5);",
    );

    let report = run_question(&mut warehouse, QuestionId::VisibilityCostRatio);

    let headline = report.headline.expect("ratio fact should exist");
    assert_eq!(headline.value, FactValue::Text("premium".to_string()));

    let Artifact::ScatterChart(chart) = &report.artifacts[0] else {
        panic!("first artifact should be the scatter chart");
    };
    assert_eq!(chart.points.len(), 2, "the free level is never plotted");
}

#[test]
fn related_products_take_the_top_three_ranks() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q8 (ranking INTEGER, name TEXT, brand TEXT, model TEXT);
         INSERT INTO q8 VALUES
           (4, 'heladera gafa', 'gafa', 'hgf-388'),
           (1, 'smart tv samsung', 'samsung', 'un55'),
           (3, 'lavarropas drean', 'drean', 'next-8'),
           (2, 'notebook lenovo', 'lenovo', 'ideapad-3'),
           (5, 'microondas bgh', 'bgh', 'quick-chef');",
    );

    let report = run_question(&mut warehouse, QuestionId::RelatedProducts);

    let Artifact::PieChart(chart) = &report.artifacts[0] else {
        panic!("first artifact should be the weight pie");
    };
    let observed: Vec<(&str, f64, &str)> = chart
        .slices
        .iter()
        .map(|slice| (slice.label.as_str(), slice.value, slice.color.as_str()))
        .collect();
    assert_eq!(
        observed,
        vec![
            ("samsung un55", 3.0, "#3e873c"),
            ("lenovo ideapad-3", 2.0, "#fec749"),
            ("drean next-8", 1.0, "#d0228e"),
        ]
    );

    let Artifact::Table(detail) = &report.artifacts[1] else {
        panic!("second artifact should be the detail table");
    };
    assert_eq!(detail.title, "Related products detail");
    assert_eq!(detail.columns, ["ranking", "label", "name", "brand", "model"]);
    assert_eq!(
        detail.rows[0],
        ["1", "samsung un55", "smart tv samsung", "samsung", "un55"]
    );
    assert!(report.headline.is_none());
}

#[test]
fn empty_views_yield_no_data_for_every_question() {
    let mut warehouse = memory_warehouse(
        "CREATE TABLE q1 (brand TEXT);
         CREATE TABLE q2 (name TEXT);
         CREATE TABLE q3567 (name TEXT, highlight_score REAL, sale_fee_amount REAL, valor_relativo REAL);
         CREATE TABLE q4 (brand TEXT);
         CREATE TABLE q8 (ranking INTEGER, name TEXT, brand TEXT, model TEXT);",
    );

    for question in tendencia::questions::all_question_ids() {
        let report = run_question(&mut warehouse, question);
        assert_eq!(report.status, QuestionStatus::NoData, "question {question:?}");
        assert!(report.headline.is_none(), "question {question:?}");
        assert_eq!(report.artifacts.len(), 1, "question {question:?}");
        assert!(
            matches!(report.artifacts[0], Artifact::Notice(_)),
            "question {question:?}"
        );
    }
}
