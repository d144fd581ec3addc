//! Identity-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reelvault_core::error::CoreError;
use reelvault_core::types::DbId;
use reelvault_db::models::user::{UpsertUser, User};
use reelvault_db::repositories::UserRepo;

use crate::auth::identity::verify_identity_token;
use crate::error::AppError;
use crate::middleware::error_reporter::ReportedUser;
use crate::state::AppState;

/// Authenticated caller, resolved from a Bearer identity token.
///
/// Resolving the user also gets-or-creates its local row, so the first
/// request from a new identity provisions the account.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's role name (`"user"` or `"admin"`).
    pub role: String,
    /// The full local user row.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let auth_config = &state.config.auth;
        let claims = verify_identity_token(token, auth_config).map_err(|e| {
            tracing::debug!(error = %e, "Identity token rejected");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let input = UpsertUser {
            initial_role: auth_config.initial_role_for(&claims.email).to_string(),
            external_auth_id: claims.sub,
            email: claims.email,
            name: claims.name,
        };
        let user = UserRepo::upsert_by_external_id(&state.pool, &input).await?;

        if let Some(slot) = parts.extensions.get::<ReportedUser>() {
            slot.set(user.id);
        }

        Ok(AuthUser {
            user_id: user.id,
            role: user.role.clone(),
            user,
        })
    }
}
