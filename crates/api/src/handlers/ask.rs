//! Handler for `/ask`: natural-language questions about stored records.

use axum::extract::State;
use axum::Json;
use csvq_assistant::snapshot::{records_to_csv, SnapshotRecord};
use csvq_core::error::CoreError;
use csvq_db::repositories::RecordRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /ask`.
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    /// Free-text question about the stored data.
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: String,
}

/// Response body for `POST /ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// POST /api/v1/ask
///
/// Serialize every stored record into a CSV snapshot and forward it with
/// the question to the assistant API. The assistant always sees the full
/// dataset; nothing bounds the snapshot size.
pub async fn ask(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<AskRequest>,
) -> AppResult<Json<DataResponse<AskResponse>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let records = RecordRepo::list_all(&state.pool).await?;
    if records.is_empty() {
        return Err(AppError::Core(CoreError::NotFound(
            "No data available to answer questions".to_string(),
        )));
    }

    let snapshot: Vec<SnapshotRecord> = records
        .into_iter()
        .map(|r| SnapshotRecord {
            id: r.id,
            name: r.name,
            age: r.age,
            email: r.email,
        })
        .collect();
    let snapshot_csv = records_to_csv(&snapshot);

    let answer = state.assistant.ask(&snapshot_csv, &input.question).await?;

    Ok(Json(DataResponse {
        data: AskResponse { answer },
    }))
}
