//! Basic-auth extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use csvq_core::error::CoreError;

use crate::auth::basic::{decode_basic, verify_credentials};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from an `Authorization: Basic` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated username.
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let (username, password) = decode_basic(header).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Basic <base64 credentials>".into(),
            ))
        })?;

        if !verify_credentials(&state.config.auth, &username, &password) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            )));
        }

        Ok(AuthUser { username })
    }
}
