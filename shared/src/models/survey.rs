//! Site survey models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A site/requirements assessment that a quotation is derived from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: Uuid,
    /// Human-readable survey code (e.g., "KS-010")
    pub survey_no: String,
    pub customer_name: String,
    pub site_address: Option<String>,
    pub status: SurveyStatus,
    /// Back-reference set when a quotation is created from this survey
    pub quotation_no: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stage of a survey in its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    New,
    InProgress,
    Completed,
    Quoted,
}

impl SurveyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyStatus::New => "new",
            SurveyStatus::InProgress => "in_progress",
            SurveyStatus::Completed => "completed",
            SurveyStatus::Quoted => "quoted",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "in_progress" => SurveyStatus::InProgress,
            "completed" => SurveyStatus::Completed,
            "quoted" => SurveyStatus::Quoted,
            _ => SurveyStatus::New,
        }
    }
}

impl std::fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
