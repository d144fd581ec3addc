//! Admin-only handlers: error-log diagnostics and user role management.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use reelvault_core::error::CoreError;
use reelvault_core::pagination::{
    clamp_limit, clamp_offset, PageInfo, DEFAULT_ERROR_LOG_LIMIT, MAX_ERROR_LOG_LIMIT,
};
use reelvault_core::roles::{is_valid_role, ROLE_ADMIN, VALID_ROLES};
use reelvault_db::models::error_log::{ErrorLogQuery, ErrorLogWithUser};
use reelvault_db::repositories::{ErrorLogRepo, UserRepo};
use serde::{Deserialize, Serialize};

use super::{parse_id, trim_optional};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Error logs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/errors`.
///
/// Everything arrives as text: a `status_code` or paging value that does
/// not parse as an integer is ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorListParams {
    pub endpoint: Option<String>,
    pub status_code: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ErrorListParams {
    fn into_query(self) -> ErrorLogQuery {
        let int = |v: Option<String>| v.and_then(|s| s.trim().parse::<i64>().ok());
        ErrorLogQuery {
            endpoint: trim_optional(self.endpoint),
            status_code: self.status_code.and_then(|s| s.trim().parse::<i32>().ok()),
            limit: clamp_limit(int(self.limit), DEFAULT_ERROR_LOG_LIMIT, MAX_ERROR_LOG_LIMIT),
            offset: clamp_offset(int(self.offset)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorLogPage {
    pub errors: Vec<ErrorLogWithUser>,
    pub pagination: PageInfo,
}

/// GET /api/v1/admin/errors?endpoint=&status_code=&limit=&offset=
///
/// Newest first. `limit` is clamped to 1..=200 and echoed back.
pub async fn list_errors(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    params: Result<Query<ErrorListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params?;
    let query = params.into_query();

    let errors = ErrorLogRepo::query(&state.pool, &query).await?;
    let total = ErrorLogRepo::count(&state.pool, &query).await?;

    Ok(Json(DataResponse::new(ErrorLogPage {
        errors,
        pagination: PageInfo::new(total, query.limit, query.offset),
    })))
}

/// GET /api/v1/admin/errors/{id}
pub async fn get_error(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&raw_id, "error id")?;
    let entry = ErrorLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Error log",
            id,
        }))?;

    Ok(Json(DataResponse::new(entry)))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(users)))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// An admin cannot demote themselves.
pub async fn update_user_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let user_id = parse_id(&raw_id, "user id")?;
    let Json(input) = body?;
    let role = input.role.trim();

    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "role must be one of: {}",
            VALID_ROLES.join(", ")
        ))));
    }
    if user_id == admin.user_id && role != ROLE_ADMIN {
        return Err(AppError::BadRequest(
            "Administrators cannot remove their own admin role".into(),
        ));
    }

    let user = UserRepo::update_role(&state.pool, user_id, role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(user_id, role, admin_id = admin.user_id, "User role updated");

    Ok(Json(DataResponse::new(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(status_code: Option<&str>, limit: Option<&str>) -> ErrorListParams {
        ErrorListParams {
            status_code: status_code.map(str::to_string),
            limit: limit.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn unparseable_status_code_is_ignored() {
        assert_eq!(params(Some("abc"), None).into_query().status_code, None);
        assert_eq!(params(Some("500"), None).into_query().status_code, Some(500));
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(params(None, None).into_query().limit, 50);
        assert_eq!(params(None, Some("10000")).into_query().limit, 200);
        assert_eq!(params(None, Some("0")).into_query().limit, 1);
        assert_eq!(params(None, Some("lots")).into_query().limit, 50);
    }

    #[test]
    fn blank_endpoint_is_no_filter() {
        let query = ErrorListParams {
            endpoint: Some("  ".into()),
            ..Default::default()
        }
        .into_query();
        assert_eq!(query.endpoint, None);
    }
}
