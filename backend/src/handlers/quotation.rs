//! HTTP handlers for quotation endpoints

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use shared::{ApiResponse, ImportedQuotation, Quotation};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::quotation::QuotationService;
use crate::AppState;

/// Import a quotation workbook uploaded from the dashboard
pub async fn import_quotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<ImportedQuotation>>> {
    let data = file_field(&mut multipart, state.config.import.max_file_bytes).await?;

    let service = QuotationService::new(state.db);
    let quotation_no = service.import_workbook(&current_user.0, &data).await?;

    Ok(Json(ApiResponse::ok(
        format!("Tạo báo giá {} thành công", quotation_no),
        ImportedQuotation { quotation_no },
    )))
}

/// List all quotations
pub async fn list_quotations(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Quotation>>>> {
    let service = QuotationService::new(state.db);
    let quotations = service.list_quotations().await?;

    Ok(Json(ApiResponse::ok(
        "Lấy danh sách báo giá thành công",
        quotations,
    )))
}

/// Get a quotation by its number
pub async fn get_quotation(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(quotation_no): Path<String>,
) -> AppResult<Json<ApiResponse<Quotation>>> {
    let service = QuotationService::new(state.db);
    let quotation = service.get_quotation(&quotation_no).await?;

    Ok(Json(ApiResponse::ok("Lấy báo giá thành công", quotation)))
}

/// Pull the uploaded workbook bytes out of the multipart body
async fn file_field(multipart: &mut Multipart, max_bytes: usize) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart.next_field().await.map_err(|e| AppError::Validation {
        field: "file".to_string(),
        message: format!("Invalid multipart body: {e}"),
        message_vi: "Dữ liệu tải lên không hợp lệ".to_string(),
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let data = field.bytes().await.map_err(|e| AppError::Validation {
            field: "file".to_string(),
            message: format!("Failed to read uploaded file: {e}"),
            message_vi: "Không đọc được file tải lên".to_string(),
        })?;

        if data.len() > max_bytes {
            return Err(AppError::Validation {
                field: "file".to_string(),
                message: format!("Uploaded workbook exceeds {max_bytes} bytes"),
                message_vi: "File tải lên vượt quá dung lượng cho phép".to_string(),
            });
        }

        return Ok(data.to_vec());
    }

    Err(AppError::Validation {
        field: "file".to_string(),
        message: "Multipart body has no 'file' field".to_string(),
        message_vi: "Thiếu file báo giá trong yêu cầu".to_string(),
    })
}
