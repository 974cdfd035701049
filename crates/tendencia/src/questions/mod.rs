pub mod brands;
pub mod exposure;
pub mod levels;
pub mod ranking;
pub mod related;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::render::{Artifact, NoticeSpec, SummarySpec};
use crate::table::TabularResult;
use crate::warehouse::CatalogQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    FanBrandLeader,
    AirFryerRanking,
    LevelDistribution,
    ApplianceBrandPreference,
    VisibilityCostRatio,
    HighExposureInvestment,
    AverageVisibility,
    RelatedProducts,
}

impl QuestionId {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::FanBrandLeader => 1,
            Self::AirFryerRanking => 2,
            Self::LevelDistribution => 3,
            Self::ApplianceBrandPreference => 4,
            Self::VisibilityCostRatio => 5,
            Self::HighExposureInvestment => 6,
            Self::AverageVisibility => 7,
            Self::RelatedProducts => 8,
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::FanBrandLeader => "fan-brand-leader",
            Self::AirFryerRanking => "air-fryer-ranking",
            Self::LevelDistribution => "level-distribution",
            Self::ApplianceBrandPreference => "appliance-brand-preference",
            Self::VisibilityCostRatio => "visibility-cost-ratio",
            Self::HighExposureInvestment => "high-exposure-investment",
            Self::AverageVisibility => "average-visibility",
            Self::RelatedProducts => "related-products",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FanBrandLeader => "Best-selling fan brand",
            Self::AirFryerRanking => "Top-selling air fryer models",
            Self::LevelDistribution => "Relative weight of exposure levels",
            Self::ApplianceBrandPreference => {
                "Preferred brand among washer-dryers, TVs and monitors"
            }
            Self::VisibilityCostRatio => "Best visibility for money",
            Self::HighExposureInvestment => "Highest investment to reach high exposure",
            Self::AverageVisibility => "Highest average visibility by level",
            Self::RelatedProducts => "Top-3 related products by ranking weight",
        }
    }

    #[must_use]
    pub const fn source_query(self) -> CatalogQuery {
        match self {
            Self::FanBrandLeader => CatalogQuery::FanBrands,
            Self::AirFryerRanking => CatalogQuery::AirFryerModels,
            Self::LevelDistribution
            | Self::VisibilityCostRatio
            | Self::HighExposureInvestment
            | Self::AverageVisibility => CatalogQuery::ExposureLevels,
            Self::ApplianceBrandPreference => CatalogQuery::ApplianceBrands,
            Self::RelatedProducts => CatalogQuery::RelatedProducts,
        }
    }

    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::FanBrandLeader),
            2 => Some(Self::AirFryerRanking),
            3 => Some(Self::LevelDistribution),
            4 => Some(Self::ApplianceBrandPreference),
            5 => Some(Self::VisibilityCostRatio),
            6 => Some(Self::HighExposureInvestment),
            7 => Some(Self::AverageVisibility),
            8 => Some(Self::RelatedProducts),
            _ => None,
        }
    }
}

#[must_use]
pub const fn all_question_ids() -> [QuestionId; 8] {
    [
        QuestionId::FanBrandLeader,
        QuestionId::AirFryerRanking,
        QuestionId::LevelDistribution,
        QuestionId::ApplianceBrandPreference,
        QuestionId::VisibilityCostRatio,
        QuestionId::HighExposureInvestment,
        QuestionId::AverageVisibility,
        QuestionId::RelatedProducts,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Ok,
    NoData,
    Failed,
}

impl QuestionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NoData => "no_data",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DerivedFact {
    pub name: String,
    pub value: FactValue,
    pub sentence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactValue {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionReport {
    pub question: QuestionId,
    pub status: QuestionStatus,
    pub artifacts: Vec<Artifact>,
    pub headline: Option<DerivedFact>,
}

impl QuestionReport {
    #[must_use]
    pub fn ok(question: QuestionId) -> Self {
        Self {
            question,
            status: QuestionStatus::Ok,
            artifacts: Vec::new(),
            headline: None,
        }
    }

    #[must_use]
    pub fn no_data(question: QuestionId) -> Self {
        Self {
            question,
            status: QuestionStatus::NoData,
            artifacts: vec![Artifact::Notice(NoticeSpec::empty_result(
                question.source_query().view_name(),
            ))],
            headline: None,
        }
    }

    #[must_use]
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    #[must_use]
    pub fn with_headline(mut self, fact: DerivedFact) -> Self {
        self.artifacts.push(Artifact::Summary(SummarySpec {
            sentence: fact.sentence.clone(),
        }));
        self.headline = Some(fact);
        self
    }
}

#[must_use]
pub fn transform(question: QuestionId, table: &TabularResult) -> QuestionReport {
    if table.is_empty() {
        return QuestionReport::no_data(question);
    }

    match question {
        QuestionId::FanBrandLeader => brands::fan_brand_leader(table),
        QuestionId::AirFryerRanking => ranking::air_fryer_ranking(table),
        QuestionId::LevelDistribution => levels::level_distribution(table),
        QuestionId::ApplianceBrandPreference => brands::appliance_brand_preference(table),
        QuestionId::VisibilityCostRatio => exposure::visibility_cost_ratio(table),
        QuestionId::HighExposureInvestment => exposure::high_exposure_investment(table),
        QuestionId::AverageVisibility => exposure::average_visibility(table),
        QuestionId::RelatedProducts => related::related_products(table),
    }
}
