//! Handlers for the `/records` resource.

use axum::extract::{Query, State};
use axum::Json;
use csvq_core::search::RecordFilter;
use csvq_db::models::record::Record;
use csvq_db::repositories::RecordRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/records
///
/// Paginated listing in insertion order.
pub async fn list_records(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Record>>>> {
    let records = RecordRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/records/search
///
/// Fetch records in insertion order and narrow them with the optional
/// age bounds and name substring (`?min_age=&max_age=&name=`). Criteria
/// AND-combine; with none given, every record comes back.
pub async fn search_records(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<RecordFilter>,
) -> AppResult<Json<DataResponse<Vec<Record>>>> {
    let mut records = RecordRepo::list_all(&state.pool).await?;
    if !filter.is_empty() {
        records.retain(|r| filter.matches(&r.name, r.age));
    }
    Ok(Json(DataResponse { data: records }))
}
