use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: csvq_db::DbPool,
    /// Server configuration (credentials, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Client for the question-answering API.
    pub assistant: Arc<csvq_assistant::AssistantClient>,
}
