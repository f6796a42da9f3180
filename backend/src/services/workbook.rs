//! Workbook decoding for quotation imports

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Reader, Xlsx};
use shared::import::layout::{PRICE_SHEET, QUOTE_SHEET};
use shared::import::SheetGrid;

use crate::error::{AppError, AppResult};

/// The two sheets the import pipeline reads, decoded to display strings
pub struct QuotationWorkbook {
    pub quote: SheetGrid,
    pub price: Option<SheetGrid>,
}

/// Decode an uploaded workbook.
///
/// The quotation sheet is the format-validation gate: its absence aborts
/// the import before any other processing. The price-list sheet is
/// optional; without it every service falls back to the default group.
pub fn decode_workbook(data: &[u8]) -> AppResult<QuotationWorkbook> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| AppError::Validation {
        field: "file".to_string(),
        message: format!("Invalid XLSX file: {e}"),
        message_vi: "File Excel không hợp lệ".to_string(),
    })?;

    let quote = sheet_grid(&mut workbook, QUOTE_SHEET)?.ok_or_else(|| AppError::Validation {
        field: "file".to_string(),
        message: format!("Workbook has no '{QUOTE_SHEET}' sheet"),
        message_vi: format!("Không tìm thấy sheet '{QUOTE_SHEET}' trong file Excel"),
    })?;
    let price = sheet_grid(&mut workbook, PRICE_SHEET)?;

    Ok(QuotationWorkbook { quote, price })
}

/// Read one sheet as trimmed display strings; `None` when the sheet is absent
fn sheet_grid(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    name: &str,
) -> AppResult<Option<SheetGrid>> {
    if !workbook.sheet_names().iter().any(|s| s == name) {
        return Ok(None);
    }

    let range = workbook
        .worksheet_range(name)
        .map_err(|e| AppError::Validation {
            field: "file".to_string(),
            message: format!("Failed to read sheet '{name}': {e}"),
            message_vi: format!("Không đọc được sheet '{name}'"),
        })?;

    Ok(Some(
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect()
            })
            .collect(),
    ))
}
