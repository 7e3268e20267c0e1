//! Handler for CSV uploads.
//!
//! Accepts a multipart file, validates it through the normalizer, and
//! stores the surviving rows. A missing required column rejects the
//! whole file; individual invalid rows are dropped and reported back
//! as rejection reasons rather than errors.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use csvq_core::error::CoreError;
use csvq_core::normalizer::{self, RejectedRow};
use csvq_db::models::record::CreateRecord;
use csvq_db::repositories::RecordRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Typed response for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    /// Number of rows that passed validation and were stored.
    pub inserted: usize,
    /// Rows dropped by the normalizer, with the constraint each violated.
    pub rejected: Vec<RejectedRow>,
}

/// POST /api/v1/upload
///
/// Accept a multipart CSV upload, validate it, and store the surviving
/// rows in one atomic batch.
pub async fn upload_csv(
    State(state): State<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResult>>)> {
    let (filename, bytes) = read_file_field(&mut multipart).await?;

    if !filename.ends_with(".csv") {
        return Err(AppError::BadRequest(
            "Only CSV files are allowed".to_string(),
        ));
    }

    let input = normalizer::parse_csv(&bytes)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Unparseable CSV: {e}"))))?;

    let batch = normalizer::normalize(&input)
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let create: Vec<CreateRecord> = batch.records.into_iter().map(CreateRecord::from).collect();
    let inserted = RecordRepo::insert_batch(&state.pool, &create).await?;

    tracing::info!(
        file = %filename,
        inserted = inserted.len(),
        rejected = batch.rejected.len(),
        "processed CSV upload"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResult {
                inserted: inserted.len(),
                rejected: batch.rejected,
            },
        }),
    ))
}

/// Pull the first multipart field that carries a filename.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        return Ok((filename, bytes));
    }

    Err(AppError::BadRequest(
        "No file received in multipart upload".to_string(),
    ))
}
