//! Quotation models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced proposal sent to a customer, derived from a site survey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub id: Uuid,
    /// Human-readable sequential number (e.g., "BG042")
    pub quotation_no: String,
    /// Customer display name exactly as written on the quotation sheet
    pub customer: String,
    /// Soft link to the customer record, when the name matched one
    pub customer_id: Option<Uuid>,
    pub survey_id: Uuid,
    pub date: NaiveDate,
    pub lines: Vec<QuotationLine>,
    pub total_amount: i64,
    pub grand_total: i64,
    pub status: QuotationStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One service line item on a quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLine {
    pub service_group: String,
    pub service: String,
    pub volume: f64,
    pub packages: Vec<PackageQuote>,
}

/// One priced tier offered for a service line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageQuote {
    pub package_name: String,
    /// Whole currency units (VND)
    pub unit_price: f64,
    /// Rounded to the nearest whole currency unit
    pub total_price: i64,
    pub is_selected: bool,
}

/// Lifecycle of a quotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "sent" => QuotationStatus::Sent,
            "accepted" => QuotationStatus::Accepted,
            "rejected" => QuotationStatus::Rejected,
            _ => QuotationStatus::Draft,
        }
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
