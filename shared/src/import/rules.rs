//! Ordered fallback rules for the loosely structured parts of the workbook.
//!
//! Both evaluators are first-matching-rule-wins. The ordering is part of the
//! template contract and must not be rearranged.

use chrono::{DateTime, NaiveDate};

use super::layout::{
    DEFAULT_PACKAGE_COUNT, PRICE_COLS_START, SENTINEL_SCAN_WINDOW, TOTAL_SENTINEL,
};

/// Outcome of one date rule: `None` when the rule does not apply and the
/// next rule should be consulted, `Some(None)` when the rule applies but the
/// value is unparseable — which ends the chain without trying later rules.
type DateRuleResult = Option<Option<NaiveDate>>;

/// Any slash commits the value to the template's DD/MM/YYYY form.
fn day_month_year_rule(raw: &str) -> DateRuleResult {
    if raw.contains('/') {
        Some(NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok())
    } else {
        None
    }
}

/// Generic parse: plain ISO date, then RFC 3339 datetime.
fn generic_date_rule(raw: &str) -> DateRuleResult {
    Some(
        raw.parse::<NaiveDate>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())),
    )
}

const DATE_RULES: &[fn(&str) -> DateRuleResult] = &[day_month_year_rule, generic_date_rule];

/// Parse the quotation date cell.
///
/// A slash-containing value is only ever read as DD/MM/YYYY; a value like
/// "2024/12/25" therefore falls back to `fallback` rather than being
/// reinterpreted by the generic rule.
pub fn parse_quote_date(raw: &str, fallback: NaiveDate) -> NaiveDate {
    let raw = raw.trim();
    if raw.is_empty() {
        return fallback;
    }
    for rule in DATE_RULES {
        if let Some(outcome) = rule(raw) {
            return outcome.unwrap_or(fallback);
        }
    }
    fallback
}

/// Number of package price columns declared on the header row.
///
/// Scans at most `SENTINEL_SCAN_WINDOW` columns from the first price column
/// for the running-total sentinel; a header without one degrades to
/// `DEFAULT_PACKAGE_COUNT` instead of failing the import.
pub fn detect_package_count(header: &[String]) -> usize {
    (0..SENTINEL_SCAN_WINDOW)
        .find(|&offset| {
            header
                .get(PRICE_COLS_START + offset)
                .is_some_and(|cell| cell.trim() == TOTAL_SENTINEL)
        })
        .unwrap_or(DEFAULT_PACKAGE_COUNT)
}
