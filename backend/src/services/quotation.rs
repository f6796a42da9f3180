//! Quotation service: workbook import, sequential numbering, and queries

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shared::import::{self, SheetError};
use shared::{
    format_quotation_no, quotation_seq, validate_totals, Quotation, QuotationLine,
    QuotationStatus, Survey, SurveyStatus,
};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::services::workbook::{decode_workbook, QuotationWorkbook};

/// Attempts at allocating a quotation number before giving up.
/// The UNIQUE index on `quotation_no` is the arbiter under concurrent
/// imports; each attempt re-reads the latest number.
const NUMBERING_RETRIES: u32 = 5;

/// Quotation service for the import pipeline and the quotation screens
#[derive(Clone)]
pub struct QuotationService {
    db: PgPool,
}

/// Database row for a quotation
#[derive(Debug, sqlx::FromRow)]
struct QuotationRow {
    id: Uuid,
    quotation_no: String,
    customer: String,
    customer_id: Option<Uuid>,
    survey_id: Uuid,
    date: NaiveDate,
    lines: serde_json::Value,
    total_amount: i64,
    grand_total: i64,
    status: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<QuotationRow> for Quotation {
    fn from(row: QuotationRow) -> Self {
        let lines: Vec<QuotationLine> = serde_json::from_value(row.lines).unwrap_or_default();

        Quotation {
            id: row.id,
            quotation_no: row.quotation_no,
            customer: row.customer,
            customer_id: row.customer_id,
            survey_id: row.survey_id,
            date: row.date,
            lines,
            total_amount: row.total_amount,
            grand_total: row.grand_total,
            status: QuotationStatus::parse(&row.status),
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for a survey
#[derive(Debug, sqlx::FromRow)]
struct SurveyRow {
    id: Uuid,
    survey_no: String,
    customer_name: String,
    site_address: Option<String>,
    status: String,
    quotation_no: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SurveyRow> for Survey {
    fn from(row: SurveyRow) -> Self {
        Survey {
            id: row.id,
            survey_no: row.survey_no,
            customer_name: row.customer_name,
            site_address: row.site_address,
            status: SurveyStatus::parse(&row.status),
            quotation_no: row.quotation_no,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl QuotationService {
    /// Create a new QuotationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Import a quotation workbook and link it to its survey.
    ///
    /// Runs the whole pipeline: decode, extract, reconcile, then persist.
    /// All validation happens before the first write; the quotation insert
    /// and the survey update share one transaction.
    pub async fn import_workbook(&self, actor: &AuthUser, data: &[u8]) -> AppResult<String> {
        let QuotationWorkbook { quote, price } = decode_workbook(data)?;
        let parsed = import::parse_workbook(&quote, price.as_ref(), Utc::now().date_naive())
            .map_err(sheet_error)?;

        validate_totals(&parsed.lines, parsed.grand_total)
            .map_err(|msg| AppError::Internal(msg.to_string()))?;

        let survey = self.find_survey(&parsed.metadata.survey_no).await?;
        if let Some(existing) = &survey.quotation_no {
            return Err(AppError::Conflict {
                message: format!(
                    "Survey {} is already linked to quotation {}",
                    survey.survey_no, existing
                ),
                message_vi: format!("Khảo sát {} đã có báo giá {}", survey.survey_no, existing),
            });
        }

        let customer_id = self.find_customer_id(&parsed.metadata.customer_name).await?;

        let lines_json = serde_json::to_value(&parsed.lines)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        for _ in 0..NUMBERING_RETRIES {
            let quotation_no = self.next_quotation_no().await?;

            let mut tx = self.db.begin().await?;

            let inserted = sqlx::query(
                r#"
                INSERT INTO quotations (
                    quotation_no, customer, customer_id, survey_id, date, lines,
                    total_amount, grand_total, status, created_by
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(&quotation_no)
            .bind(&parsed.metadata.customer_name)
            .bind(customer_id)
            .bind(survey.id)
            .bind(parsed.metadata.date)
            .bind(&lines_json)
            .bind(parsed.grand_total)
            .bind(parsed.grand_total)
            .bind(QuotationStatus::Draft.as_str())
            .bind(&actor.name)
            .execute(&mut *tx)
            .await;

            match inserted {
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    // Lost the number to a concurrent import; take the next one
                    tx.rollback().await?;
                    continue;
                }
                Err(e) => return Err(e.into()),
                Ok(_) => {}
            }

            sqlx::query(
                "UPDATE surveys SET quotation_no = $1, status = $2, updated_at = NOW() WHERE id = $3",
            )
            .bind(&quotation_no)
            .bind(SurveyStatus::Quoted.as_str())
            .bind(survey.id)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;

            tracing::info!(
                quotation_no = %quotation_no,
                survey_no = %survey.survey_no,
                "Imported quotation"
            );
            return Ok(quotation_no);
        }

        Err(AppError::Conflict {
            message: "Could not allocate a quotation number".to_string(),
            message_vi: "Không thể cấp số báo giá, vui lòng thử lại".to_string(),
        })
    }

    /// List all quotations, newest first
    pub async fn list_quotations(&self) -> AppResult<Vec<Quotation>> {
        let rows = sqlx::query_as::<_, QuotationRow>(
            r#"
            SELECT id, quotation_no, customer, customer_id, survey_id, date, lines,
                   total_amount, grand_total, status, created_by, created_at, updated_at
            FROM quotations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get a quotation by its human-readable number
    pub async fn get_quotation(&self, quotation_no: &str) -> AppResult<Quotation> {
        let row = sqlx::query_as::<_, QuotationRow>(
            r#"
            SELECT id, quotation_no, customer, customer_id, survey_id, date, lines,
                   total_amount, grand_total, status, created_by, created_at, updated_at
            FROM quotations
            WHERE quotation_no = $1
            "#,
        )
        .bind(quotation_no)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Quotation {quotation_no}"),
            message_vi: format!("Không tìm thấy báo giá {quotation_no}"),
        })?;

        Ok(row.into())
    }

    /// Next quotation number derived from the most recent one on record
    async fn next_quotation_no(&self) -> AppResult<String> {
        let last: Option<String> = sqlx::query_scalar(
            "SELECT quotation_no FROM quotations ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await?;

        let seq = last.as_deref().and_then(quotation_seq).unwrap_or(0) + 1;
        Ok(format_quotation_no(seq))
    }

    /// Survey referenced by the workbook; its absence fails the import
    async fn find_survey(&self, survey_no: &str) -> AppResult<Survey> {
        let row = sqlx::query_as::<_, SurveyRow>(
            r#"
            SELECT id, survey_no, customer_name, site_address, status, quotation_no,
                   notes, created_at, updated_at
            FROM surveys
            WHERE survey_no = $1
            "#,
        )
        .bind(survey_no)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Survey {survey_no}"),
            message_vi: format!("Không tìm thấy khảo sát với mã {survey_no}"),
        })?;

        Ok(row.into())
    }

    /// Best-effort customer match by exact name; no match is not an error
    async fn find_customer_id(&self, full_name: &str) -> AppResult<Option<Uuid>> {
        let id =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM customers WHERE full_name = $1 LIMIT 1")
                .bind(full_name)
                .fetch_optional(&self.db)
                .await?;

        Ok(id)
    }
}

/// Map pure pipeline failures onto the platform's error taxonomy
fn sheet_error(err: SheetError) -> AppError {
    match err {
        SheetError::MissingCustomerName => AppError::Validation {
            field: "customer".to_string(),
            message: "Customer name cell is empty".to_string(),
            message_vi: "Thiếu tên khách hàng trong file báo giá".to_string(),
        },
        SheetError::MissingSurveyNo => AppError::Validation {
            field: "survey_no".to_string(),
            message: "Survey code cell is empty".to_string(),
            message_vi: "Thiếu mã khảo sát trong file báo giá".to_string(),
        },
        SheetError::NoValidLines => AppError::Validation {
            field: "lines".to_string(),
            message: "No service row survived reconciliation".to_string(),
            message_vi: "File báo giá không có dòng dịch vụ hợp lệ nào".to_string(),
        },
    }
}
