pub mod palette;
pub mod text;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    BarChart(BarChartSpec),
    PieChart(PieChartSpec),
    ScatterChart(ScatterChartSpec),
    Table(TableSpec),
    Notice(NoticeSpec),
    Summary(SummarySpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Count,
    Fixed2,
}

impl ValueFormat {
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Count => format!("{}", value.round() as i64),
            Self::Fixed2 => format!("{value:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub value_format: ValueFormat,
    pub bars: Vec<BarSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BarSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PieChartSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChartSpec {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|slice| slice.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScatterChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    pub series: Vec<SeriesColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<ScatterAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScatterPoint {
    pub series: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SeriesColor {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScatterAnnotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableSpec {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub highlights: Vec<RowHighlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RowHighlight {
    pub row_index: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NoticeSpec {
    pub notice_kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    EmptyResult,
    NoHighExposure,
}

impl NoticeSpec {
    #[must_use]
    pub fn empty_result(view_name: &str) -> Self {
        Self {
            notice_kind: NoticeKind::EmptyResult,
            message: format!(
                "The {view_name} view returned no rows; there is nothing to chart for this question."
            ),
        }
    }

    #[must_use]
    pub fn no_high_exposure() -> Self {
        Self {
            notice_kind: NoticeKind::NoHighExposure,
            message: "No records reach the high-exposure threshold.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummarySpec {
    pub sentence: String,
}
