//! Quotation workbook import pipeline.
//!
//! The pipeline operates on sheets already decoded to grids of display
//! strings, so everything here is pure: the spreadsheet backend and the
//! database stay on the other side of the boundary. Stages run strictly
//! forward — metadata extraction, package-column detection, row
//! reconciliation — and the first failing validation aborts the whole
//! import.

pub mod layout;
pub mod rules;

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{PackageQuote, QuotationLine};
use self::layout::{
    CUSTOMER_COL, DATA_START_ROW, DATE_COL, FALLBACK_GROUP, HEADER_ROW, META_ROW,
    PRICE_COLS_START, SERVICE_COL, SERVICE_GROUP_HEADER, SERVICE_NAME_HEADER, SURVEY_COL,
    VOLUME_COL,
};
use self::rules::{detect_package_count, parse_quote_date};

/// A sheet decoded to display strings, row-major
pub type SheetGrid = Vec<Vec<String>>;

/// Validation failures raised by the pure pipeline stages
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("customer name cell (B2) is empty")]
    MissingCustomerName,

    #[error("survey code cell (F2) is empty")]
    MissingSurveyNo,

    #[error("no service row survived reconciliation")]
    NoValidLines,
}

/// Fixed-position header metadata from the quotation sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMetadata {
    pub customer_name: String,
    pub survey_no: String,
    pub date: NaiveDate,
}

/// A detected package price column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageColumn {
    pub col: usize,
    pub name: String,
}

/// Everything the persistence layer needs from one workbook
#[derive(Debug, Clone)]
pub struct ParsedQuotation {
    pub metadata: QuoteMetadata,
    pub lines: Vec<QuotationLine>,
    pub grand_total: i64,
}

/// Read the fixed metadata cells off the quotation sheet.
///
/// Customer name and survey code are mandatory; a blank or unparseable date
/// falls back to `today`.
pub fn extract_metadata(quote: &[Vec<String>], today: NaiveDate) -> Result<QuoteMetadata, SheetError> {
    let customer_name = cell(quote, META_ROW, CUSTOMER_COL);
    if customer_name.is_empty() {
        return Err(SheetError::MissingCustomerName);
    }
    let survey_no = cell(quote, META_ROW, SURVEY_COL);
    if survey_no.is_empty() {
        return Err(SheetError::MissingSurveyNo);
    }
    let date = parse_quote_date(&cell(quote, META_ROW, DATE_COL), today);
    Ok(QuoteMetadata {
        customer_name,
        survey_no,
        date,
    })
}

/// Build the service→group lookup from the price-list sheet.
///
/// Columns are located by header name on the first row; rows with a blank
/// service or group are skipped and duplicate service names are
/// last-write-wins.
pub fn build_service_groups(price: &[Vec<String>]) -> HashMap<String, String> {
    let mut groups = HashMap::new();

    let Some(header) = price.first() else {
        return groups;
    };
    let position = |name: &str| header.iter().position(|cell| cell.trim() == name);
    let (Some(name_col), Some(group_col)) =
        (position(SERVICE_NAME_HEADER), position(SERVICE_GROUP_HEADER))
    else {
        return groups;
    };

    for row in price.iter().skip(1) {
        let service = row.get(name_col).map(|c| c.trim()).unwrap_or_default();
        let group = row.get(group_col).map(|c| c.trim()).unwrap_or_default();
        if service.is_empty() || group.is_empty() {
            continue;
        }
        groups.insert(service.to_string(), group.to_string());
    }
    groups
}

/// Detect the package price columns on the quotation sheet header row.
///
/// The count comes from the sentinel scan; columns whose label cell is
/// empty are omitted.
pub fn detect_package_columns(quote: &[Vec<String>]) -> Vec<PackageColumn> {
    let empty = Vec::new();
    let header = quote.get(HEADER_ROW).unwrap_or(&empty);
    let count = detect_package_count(header);

    (0..count)
        .filter_map(|offset| {
            let col = PRICE_COLS_START + offset;
            let name = header.get(col).map(|c| c.trim()).unwrap_or_default();
            if name.is_empty() {
                None
            } else {
                Some(PackageColumn {
                    col,
                    name: name.to_string(),
                })
            }
        })
        .collect()
}

/// Walk the data rows and reconcile each against the detected package
/// columns.
///
/// Rows missing a service name or volume, or whose volume parses to zero,
/// are skipped. Package entries are kept only with a strictly positive unit
/// price; a row retaining none is dropped. Returns the surviving lines and
/// the accumulated grand total.
pub fn collect_lines(
    quote: &[Vec<String>],
    columns: &[PackageColumn],
    groups: &HashMap<String, String>,
) -> (Vec<QuotationLine>, i64) {
    let mut lines = Vec::new();
    let mut grand_total = 0i64;

    for row in quote.iter().skip(DATA_START_ROW) {
        let service = row.get(SERVICE_COL).map(|c| c.trim()).unwrap_or_default();
        let volume_raw = row.get(VOLUME_COL).map(|c| c.trim()).unwrap_or_default();
        if service.is_empty() || volume_raw.is_empty() {
            continue;
        }
        let volume = parse_numeric(volume_raw);
        if volume == 0.0 {
            continue;
        }

        let mut packages = Vec::new();
        for column in columns {
            let unit_price = parse_numeric(row.get(column.col).map(String::as_str).unwrap_or(""));
            if unit_price <= 0.0 {
                continue;
            }
            packages.push(PackageQuote {
                package_name: column.name.clone(),
                unit_price,
                total_price: (volume * unit_price).round() as i64,
                is_selected: true,
            });
        }
        if packages.is_empty() {
            continue;
        }

        grand_total += packages.iter().map(|p| p.total_price).sum::<i64>();
        lines.push(QuotationLine {
            service_group: groups
                .get(service)
                .cloned()
                .unwrap_or_else(|| FALLBACK_GROUP.to_string()),
            service: service.to_string(),
            volume,
            packages,
        });
    }

    (lines, grand_total)
}

/// Run the full pipeline over the decoded sheets.
pub fn parse_workbook(
    quote: &SheetGrid,
    price: Option<&SheetGrid>,
    today: NaiveDate,
) -> Result<ParsedQuotation, SheetError> {
    let metadata = extract_metadata(quote, today)?;
    let groups = price.map(|rows| build_service_groups(rows)).unwrap_or_default();
    let columns = detect_package_columns(quote);
    let (lines, grand_total) = collect_lines(quote, &columns, &groups);
    if lines.is_empty() {
        return Err(SheetError::NoValidLines);
    }
    Ok(ParsedQuotation {
        metadata,
        lines,
        grand_total,
    })
}

fn cell(grid: &[Vec<String>], row: usize, col: usize) -> String {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(|c| c.trim().to_string())
        .unwrap_or_default()
}

/// Standard floating-point parse; non-numeric cells yield 0, never an error.
fn parse_numeric(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}
