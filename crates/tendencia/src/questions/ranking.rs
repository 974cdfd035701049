use crate::render::palette::rank_highlight_color;
use crate::render::{Artifact, RowHighlight, TableSpec};
use crate::table::TabularResult;

use super::{DerivedFact, FactValue, QuestionId, QuestionReport};

#[must_use]
pub fn air_fryer_ranking(table: &TabularResult) -> QuestionReport {
    let names = ranked_names(table);
    let Some(top) = names.first().cloned() else {
        return QuestionReport::no_data(QuestionId::AirFryerRanking);
    };

    let rows = names
        .iter()
        .enumerate()
        .map(|(index, name)| vec![(index + 1).to_string(), name.clone()])
        .collect();
    let highlights = (1..=names.len())
        .filter_map(|rank| {
            rank_highlight_color(rank).map(|color| RowHighlight {
                row_index: rank - 1,
                color: color.to_string(),
            })
        })
        .collect();
    let table_spec = TableSpec {
        title: QuestionId::AirFryerRanking.title().to_string(),
        columns: vec!["ranking".to_string(), "name".to_string()],
        rows,
        highlights,
    };

    let headline = DerivedFact {
        name: "top_air_fryer_model".to_string(),
        value: FactValue::Text(top.clone()),
        sentence: format!("The best selling air fryer model is {top}."),
    };

    QuestionReport::ok(QuestionId::AirFryerRanking)
        .with_artifact(Artifact::Table(table_spec))
        .with_headline(headline)
}

#[must_use]
pub fn ranked_names(table: &TabularResult) -> Vec<String> {
    table
        .rows()
        .filter_map(|row| row.text("name"))
        .filter(|name| name.trim().to_lowercase() != "name")
        .map(ToString::to_string)
        .collect()
}
