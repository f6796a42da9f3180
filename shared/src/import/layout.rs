//! Template descriptor for the quotation workbook.
//!
//! The dashboard's Excel template is a fixed layout; every position the
//! import pipeline depends on is named here so the contract stays in one
//! place. Row and column indices are 0-based.

/// Required quotation sheet
pub const QUOTE_SHEET: &str = "3. Báo giá";

/// Optional service/price-list sheet feeding the service→group lookup
pub const PRICE_SHEET: &str = "1. Dịch vụ & Bảng giá";

/// Row holding the fixed metadata cells (B2/D2/F2)
pub const META_ROW: usize = 1;
/// Customer name cell column (B2)
pub const CUSTOMER_COL: usize = 1;
/// Quotation date cell column (D2)
pub const DATE_COL: usize = 3;
/// Survey code cell column (F2)
pub const SURVEY_COL: usize = 5;

/// Row holding the package labels and the running-total sentinel
pub const HEADER_ROW: usize = 4;
/// First row of service line items
pub const DATA_START_ROW: usize = 5;

/// Service name column on data rows
pub const SERVICE_COL: usize = 1;
/// Volume column on data rows
pub const VOLUME_COL: usize = 2;
/// First package unit-price column
pub const PRICE_COLS_START: usize = 3;

/// Label marking the end of the package price columns
pub const TOTAL_SENTINEL: &str = "THÀNH TIỀN";
/// How many columns past `PRICE_COLS_START` to look for the sentinel
pub const SENTINEL_SCAN_WINDOW: usize = 20;
/// Package count assumed when the sentinel is missing from the window
pub const DEFAULT_PACKAGE_COUNT: usize = 3;

/// Price-list column header for the service name
pub const SERVICE_NAME_HEADER: &str = "Tên Dịch Vụ";
/// Price-list column header for the service group
pub const SERVICE_GROUP_HEADER: &str = "Nhóm Dịch Vụ";

/// Group label for services missing from the price list ("Other")
pub const FALLBACK_GROUP: &str = "Khác";
