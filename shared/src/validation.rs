//! Validation utilities for the Business Administration Platform

use crate::models::QuotationLine;

/// Prefix for quotation numbers ("báo giá")
pub const QUOTATION_NO_PREFIX: &str = "BG";

/// Format a sequence as a quotation number.
///
/// Zero-pads to three digits; the padding never truncates, so "BG999" is
/// followed by "BG1000".
pub fn format_quotation_no(seq: u32) -> String {
    format!("{}{:03}", QUOTATION_NO_PREFIX, seq)
}

/// Extract the first run of digits from a quotation number, e.g. "BG042" -> 42.
pub fn quotation_seq(quotation_no: &str) -> Option<u32> {
    let digits: String = quotation_no
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Validate the totals invariant over reconciled quotation lines.
///
/// Every persisted line must carry a non-zero volume and at least one
/// strictly-positive-priced package, and the grand total must equal the sum
/// of all package totals.
pub fn validate_totals(lines: &[QuotationLine], grand_total: i64) -> Result<(), &'static str> {
    let sum: i64 = lines
        .iter()
        .flat_map(|line| &line.packages)
        .map(|package| package.total_price)
        .sum();
    if sum != grand_total {
        return Err("Grand total does not equal the sum of package totals");
    }
    for line in lines {
        if line.volume == 0.0 {
            return Err("Quotation line has zero volume");
        }
        if line.packages.is_empty() {
            return Err("Quotation line has no packages");
        }
        if line.packages.iter().any(|p| p.unit_price <= 0.0) {
            return Err("Package entry has a non-positive unit price");
        }
    }
    Ok(())
}
