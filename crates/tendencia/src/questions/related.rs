use crate::render::palette::{RELATED_PALETTE, assign_colors};
use crate::render::{Artifact, PieChartSpec, PieSlice, TableSpec};
use crate::table::TabularResult;

use super::{QuestionId, QuestionReport};

#[must_use]
pub fn related_products(table: &TabularResult) -> QuestionReport {
    let mut entries: Vec<RelatedEntry> = table
        .rows()
        .filter_map(|row| {
            let ranking = row.integer("ranking")?;
            Some(RelatedEntry {
                ranking,
                name: text_or_empty(row.text("name")),
                brand: text_or_empty(row.text("brand")),
                model: text_or_empty(row.text("model")),
            })
        })
        .collect();
    if entries.is_empty() {
        return QuestionReport::no_data(QuestionId::RelatedProducts);
    }
    entries.sort_by_key(|entry| entry.ranking);

    let max_rank = entries
        .iter()
        .map(|entry| entry.ranking)
        .max()
        .unwrap_or(0);
    let weighted: Vec<(RelatedEntry, i64)> = entries
        .into_iter()
        .filter_map(|entry| {
            let weight = max_rank
                .checked_sub(entry.ranking)
                .and_then(|distance| distance.checked_add(1))?;
            Some((entry, weight))
        })
        .collect();

    let mut distribution: Vec<(String, f64)> = Vec::new();
    for (entry, weight) in &weighted {
        let label = entry.display_label();
        match distribution.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, total)) => *total += *weight as f64,
            None => distribution.push((label, *weight as f64)),
        }
    }

    let colors = assign_colors(
        distribution.iter().map(|(label, _)| label.as_str()),
        &RELATED_PALETTE,
    );
    let color_for = |label: &str| {
        colors
            .iter()
            .find(|(seen, _)| seen == label)
            .map_or_else(String::new, |(_, color)| (*color).to_string())
    };
    let slices = distribution
        .iter()
        .map(|(label, weight)| PieSlice {
            label: label.clone(),
            value: *weight,
            color: color_for(label),
        })
        .collect();
    let chart = PieChartSpec {
        title: QuestionId::RelatedProducts.title().to_string(),
        slices,
    };

    let rows = weighted
        .iter()
        .map(|(entry, _)| {
            vec![
                entry.ranking.to_string(),
                entry.display_label(),
                entry.name.clone(),
                entry.brand.clone(),
                entry.model.clone(),
            ]
        })
        .collect();
    let table_spec = TableSpec {
        title: "Related products detail".to_string(),
        columns: vec![
            "ranking".to_string(),
            "label".to_string(),
            "name".to_string(),
            "brand".to_string(),
            "model".to_string(),
        ],
        rows,
        highlights: Vec::new(),
    };

    QuestionReport::ok(QuestionId::RelatedProducts)
        .with_artifact(Artifact::PieChart(chart))
        .with_artifact(Artifact::Table(table_spec))
}

fn text_or_empty(value: Option<&str>) -> String {
    value.map_or_else(String::new, |text| text.trim().to_string())
}

#[derive(Debug, Clone, PartialEq)]
struct RelatedEntry {
    ranking: i64,
    name: String,
    brand: String,
    model: String,
}

impl RelatedEntry {
    fn display_label(&self) -> String {
        match (self.brand.is_empty(), self.model.is_empty()) {
            (false, false) => format!("{} {}", self.brand, self.model),
            (false, true) => self.brand.clone(),
            (true, _) if !self.name.is_empty() => self.name.clone(),
            _ => "unnamed".to_string(),
        }
    }
}
