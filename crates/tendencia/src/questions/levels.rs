use crate::render::palette::{LEVEL_PALETTE, assign_colors};
use crate::render::{Artifact, PieChartSpec, PieSlice};
use crate::table::TabularResult;

use super::{QuestionId, QuestionReport};

#[must_use]
pub fn level_distribution(table: &TabularResult) -> QuestionReport {
    let mut weighted: Vec<(String, f64)> = table
        .rows()
        .filter_map(|row| {
            let name = row.text("name")?;
            let weight = row.number("valor_relativo")?;
            (weight > 0.0).then(|| (name.to_string(), weight))
        })
        .collect();
    if weighted.is_empty() {
        return QuestionReport::no_data(QuestionId::LevelDistribution);
    }

    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut aggregated: Vec<(String, f64)> = Vec::new();
    for (name, weight) in weighted {
        match aggregated.iter_mut().find(|(label, _)| *label == name) {
            Some((_, sum)) => *sum += weight,
            None => aggregated.push((name, weight)),
        }
    }

    let colors = assign_colors(
        aggregated.iter().map(|(label, _)| label.as_str()),
        &LEVEL_PALETTE,
    );
    let slices = aggregated
        .into_iter()
        .zip(colors)
        .map(|((label, value), (_, color))| PieSlice {
            label,
            value,
            color: color.to_string(),
        })
        .collect();
    let chart = PieChartSpec {
        title: QuestionId::LevelDistribution.title().to_string(),
        slices,
    };

    QuestionReport::ok(QuestionId::LevelDistribution).with_artifact(Artifact::PieChart(chart))
}
