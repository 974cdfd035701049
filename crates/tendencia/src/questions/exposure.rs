use std::collections::BTreeMap;

use crate::render::palette::{BRAND_BAR_COLOR, EXPOSURE_PALETTE, assign_colors};
use crate::render::{
    Artifact, BarChartSpec, BarSlice, NoticeSpec, ScatterAnnotation, ScatterChartSpec,
    ScatterPoint, SeriesColor, ValueFormat,
};
use crate::table::TabularResult;

use super::{DerivedFact, FactValue, QuestionId, QuestionReport};

#[must_use]
pub fn visibility_cost_ratio(table: &TabularResult) -> QuestionReport {
    let candidates = priced_rows(table);
    if candidates.is_empty() {
        return QuestionReport::no_data(QuestionId::VisibilityCostRatio);
    }

    let mut best_index = 0;
    let mut best_ratio = candidates[0].score / candidates[0].fee;
    for (index, row) in candidates.iter().enumerate().skip(1) {
        let ratio = row.score / row.fee;
        if ratio > best_ratio {
            best_ratio = ratio;
            best_index = index;
        }
    }
    let best = &candidates[best_index];

    let chart = scatter_chart(
        QuestionId::VisibilityCostRatio.title(),
        &candidates,
        None,
    );
    let headline = DerivedFact {
        name: "best_visibility_cost_ratio".to_string(),
        value: FactValue::Text(best.name.clone()),
        sentence: format!(
            "The best visibility-to-cost ratio is {} (score {} for a fee of {}).",
            best.name, best.score, best.fee
        ),
    };

    QuestionReport::ok(QuestionId::VisibilityCostRatio)
        .with_artifact(chart)
        .with_headline(headline)
}

#[must_use]
pub fn high_exposure_investment(table: &TabularResult) -> QuestionReport {
    let scores: Vec<f64> = table
        .rows()
        .filter_map(|row| row.number("highlight_score"))
        .collect();
    if scores.is_empty() {
        return QuestionReport::ok(QuestionId::HighExposureInvestment)
            .with_artifact(Artifact::Notice(NoticeSpec::no_high_exposure()));
    }
    let threshold = scores.iter().sum::<f64>() / scores.len() as f64;

    let candidates: Vec<ExposureRow> = priced_rows(table)
        .into_iter()
        .filter(|row| row.score >= threshold)
        .collect();
    if candidates.is_empty() {
        return QuestionReport::ok(QuestionId::HighExposureInvestment)
            .with_artifact(Artifact::Notice(NoticeSpec::no_high_exposure()));
    }

    let mut best_index = 0;
    for (index, row) in candidates.iter().enumerate().skip(1) {
        if row.fee > candidates[best_index].fee {
            best_index = index;
        }
    }
    let best = candidates[best_index].clone();

    let plotted = complete_rows(table);
    let annotation = ScatterAnnotation {
        x: best.fee,
        y: best.score,
        text: format!("{} has the highest cost among high-exposure levels", best.name),
    };
    let chart = scatter_chart(
        QuestionId::HighExposureInvestment.title(),
        &plotted,
        Some(annotation),
    );

    let headline = DerivedFact {
        name: "high_exposure_top_investment".to_string(),
        value: FactValue::Text(best.name.clone()),
        sentence: format!(
            "{} requires the highest investment ({}) to reach high exposure (threshold {:.2}).",
            best.name, best.fee, threshold
        ),
    };

    QuestionReport::ok(QuestionId::HighExposureInvestment)
        .with_artifact(chart)
        .with_headline(headline)
}

#[must_use]
pub fn average_visibility(table: &TabularResult) -> QuestionReport {
    let mut sums: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for row in table.rows() {
        let Some(name) = row.text("name") else {
            continue;
        };
        let Some(score) = row.number("highlight_score") else {
            continue;
        };
        let entry = sums.entry(name.to_string()).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }
    if sums.is_empty() {
        return QuestionReport::no_data(QuestionId::AverageVisibility);
    }

    let mut means: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(name, (sum, count))| (name, sum / count as f64))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let bars = means
        .iter()
        .map(|(name, mean)| BarSlice {
            label: name.clone(),
            value: *mean,
            color: BRAND_BAR_COLOR.to_string(),
        })
        .collect();
    let chart = BarChartSpec {
        title: QuestionId::AverageVisibility.title().to_string(),
        x_label: "Level".to_string(),
        y_label: "Average score".to_string(),
        value_format: ValueFormat::Fixed2,
        bars,
    };

    let (top_name, top_mean) = means[0].clone();
    let headline = DerivedFact {
        name: "highest_average_visibility".to_string(),
        value: FactValue::Text(top_name.clone()),
        sentence: format!(
            "The level with the highest average visibility is {top_name} (average score {top_mean:.2})."
        ),
    };

    QuestionReport::ok(QuestionId::AverageVisibility)
        .with_artifact(Artifact::BarChart(chart))
        .with_headline(headline)
}

#[derive(Debug, Clone, PartialEq)]
struct ExposureRow {
    name: String,
    score: f64,
    fee: f64,
}

fn complete_rows(table: &TabularResult) -> Vec<ExposureRow> {
    table
        .rows()
        .filter_map(|row| {
            let name = row.text("name")?;
            let score = row.number("highlight_score")?;
            let fee = row.number("sale_fee_amount")?;
            Some(ExposureRow {
                name: name.to_string(),
                score,
                fee,
            })
        })
        .collect()
}

fn priced_rows(table: &TabularResult) -> Vec<ExposureRow> {
    complete_rows(table)
        .into_iter()
        .filter(|row| row.fee > 0.0)
        .collect()
}

fn scatter_chart(title: &str, rows: &[ExposureRow], annotation: Option<ScatterAnnotation>) -> Artifact {
    let points = rows
        .iter()
        .map(|row| ScatterPoint {
            series: row.name.clone(),
            x: row.fee,
            y: row.score,
        })
        .collect();
    let series = assign_colors(rows.iter().map(|row| row.name.as_str()), &EXPOSURE_PALETTE)
        .into_iter()
        .map(|(label, color)| SeriesColor {
            label,
            color: color.to_string(),
        })
        .collect();

    Artifact::ScatterChart(ScatterChartSpec {
        title: title.to_string(),
        x_label: "Sale fee".to_string(),
        y_label: "Visibility score".to_string(),
        points,
        series,
        annotation,
    })
}
