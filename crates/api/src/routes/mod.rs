//! Route definitions.

pub mod health;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::handlers::{ask, records, upload};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET   /                 welcome (auth)
/// POST  /upload           CSV upload, multipart (auth)
/// GET   /records          paginated listing (auth)
/// GET   /records/search   filtered listing (auth)
/// POST  /ask              question answering (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/upload", post(upload::upload_csv))
        .route("/records", get(records::list_records))
        .route("/records/search", get(records::search_records))
        .route("/ask", post(ask::ask))
}

/// Welcome payload for the authenticated root check.
#[derive(Debug, Serialize)]
struct WelcomeResponse {
    message: String,
}

/// GET /api/v1/
///
/// Authenticated liveness check greeting the caller.
async fn welcome(user: AuthUser) -> Json<DataResponse<WelcomeResponse>> {
    Json(DataResponse {
        data: WelcomeResponse {
            message: format!("Welcome {}, the CSV API is up and running", user.username),
        },
    })
}
