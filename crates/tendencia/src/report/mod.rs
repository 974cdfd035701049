use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::WarehouseSettings;
use crate::questions::{DerivedFact, QuestionId, QuestionReport, QuestionStatus, transform};
use crate::render::Artifact;
use crate::utils::time::utc_now_stamp;
use crate::warehouse::{ConnectionFailure, Warehouse};

pub const REPORT_SCHEMA_VERSION: &str = "tendencia.dashboard-report.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardReport {
    pub schema_version: String,
    pub generated_at_utc: String,
    pub database: String,
    pub schema: String,
    pub questions: Vec<QuestionSection>,
}

impl DashboardReport {
    #[must_use]
    pub fn new(settings: &WarehouseSettings, questions: Vec<QuestionSection>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at_utc: utc_now_stamp(),
            database: settings.database.display().to_string(),
            schema: settings.schema.clone(),
            questions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSection {
    pub number: u8,
    pub slug: String,
    pub title: String,
    pub source_view: String,
    pub status: QuestionStatus,
    pub artifacts: Vec<Artifact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<DerivedFact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuestionSection {
    #[must_use]
    pub fn from_report(report: QuestionReport) -> Self {
        Self {
            number: report.question.number(),
            slug: report.question.slug().to_string(),
            title: report.question.title().to_string(),
            source_view: report.question.source_query().view_name().to_string(),
            status: report.status,
            artifacts: report.artifacts,
            headline: report.headline,
            error: None,
        }
    }

    pub fn from_fetch(warehouse: &mut Warehouse, question: QuestionId) -> Result<Self> {
        match warehouse.fetch(question.source_query()) {
            Ok(table) => Ok(Self::from_report(transform(question, &table))),
            Err(error) if error.downcast_ref::<ConnectionFailure>().is_some() => Err(error),
            Err(error) => Ok(Self::failed(question, &error)),
        }
    }

    #[must_use]
    pub fn failed(question: QuestionId, error: &anyhow::Error) -> Self {
        Self {
            number: question.number(),
            slug: question.slug().to_string(),
            title: question.title().to_string(),
            source_view: question.source_query().view_name().to_string(),
            status: QuestionStatus::Failed,
            artifacts: Vec::new(),
            headline: None,
            error: Some(format!("{error:#}")),
        }
    }
}

#[must_use]
pub fn json_schema() -> Value {
    let schema = schemars::schema_for!(DashboardReport);
    match serde_json::to_value(schema) {
        Ok(value) => value,
        Err(error) => {
            panic!("failed to serialize generated dashboard report schema: {error}");
        }
    }
}
