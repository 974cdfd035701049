use std::collections::BTreeMap;

use crate::render::palette::BRAND_BAR_COLOR;
use crate::render::{Artifact, BarChartSpec, BarSlice, ValueFormat};
use crate::table::TabularResult;

use super::{DerivedFact, FactValue, QuestionId, QuestionReport};

#[must_use]
pub fn fan_brand_leader(table: &TabularResult) -> QuestionReport {
    brand_count_report(QuestionId::FanBrandLeader, table, "top_fan_brand", |brand| {
        format!("The best selling fan brand is {brand}.")
    })
}

#[must_use]
pub fn appliance_brand_preference(table: &TabularResult) -> QuestionReport {
    brand_count_report(
        QuestionId::ApplianceBrandPreference,
        table,
        "preferred_appliance_brand",
        |brand| format!("The most present brand across washer-dryers, TVs and monitors is {brand}."),
    )
}

fn brand_count_report(
    question: QuestionId,
    table: &TabularResult,
    fact_name: &str,
    sentence: impl Fn(&str) -> String,
) -> QuestionReport {
    let counts = count_by_label(table, "brand");
    let Some((top_brand, _)) = counts.first().cloned() else {
        return QuestionReport::no_data(question);
    };

    let bars = counts
        .iter()
        .map(|(brand, count)| BarSlice {
            label: brand.clone(),
            value: *count as f64,
            color: BRAND_BAR_COLOR.to_string(),
        })
        .collect();
    let chart = BarChartSpec {
        title: question.title().to_string(),
        x_label: "Brand".to_string(),
        y_label: "Listings".to_string(),
        value_format: ValueFormat::Count,
        bars,
    };

    let headline = DerivedFact {
        name: fact_name.to_string(),
        value: FactValue::Text(top_brand.clone()),
        sentence: sentence(&top_brand),
    };

    QuestionReport::ok(question)
        .with_artifact(Artifact::BarChart(chart))
        .with_headline(headline)
}

fn count_by_label(table: &TabularResult, column: &str) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for row in table.rows() {
        let Some(label) = row.text(column) else {
            continue;
        };
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }

    let mut ordered: Vec<(String, u64)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ordered
}
