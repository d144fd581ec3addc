//! Persist every `AppError` response to the `error_logs` table.
//!
//! [`AppError`](crate::error::AppError) tags its responses with an
//! [`ErrorReport`]. This layer looks for that tag after the handler runs
//! and appends one entry per error. Writing the entry never changes the
//! response.

use std::sync::{Arc, OnceLock};

use axum::extract::{OriginalUri, Request, State};
use axum::http::header::USER_AGENT;
use axum::middleware::Next;
use axum::response::Response;
use reelvault_core::types::DbId;
use reelvault_db::models::error_log::{CreateErrorLog, ErrorDetails};
use reelvault_db::repositories::ErrorLogRepo;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::state::AppState;

/// Per-request slot the auth extractor fills with the resolved user id.
#[derive(Debug, Clone, Default)]
pub struct ReportedUser(Arc<OnceLock<DbId>>);

impl ReportedUser {
    pub fn set(&self, user_id: DbId) {
        let _ = self.0.set(user_id);
    }

    pub fn get(&self) -> Option<DbId> {
        self.0.get().copied()
    }
}

/// Middleware body, mounted with `axum::middleware::from_fn_with_state`.
pub async fn report_errors(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let reported_user = ReportedUser::default();
    request.extensions_mut().insert(reported_user.clone());

    let method = request.method().to_string();
    let endpoint = original_uri(&request).path().to_string();
    let request_id = header_value(&request, "x-request-id");
    let details = request_details(&request);

    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<ErrorReport>() else {
        return response;
    };

    let entry = CreateErrorLog {
        endpoint,
        method,
        status_code: i32::from(response.status().as_u16()),
        error_code: report.code.to_string(),
        message: report.message.clone(),
        user_id: reported_user.get(),
        request_id,
        details,
    };

    if let Err(e) = ErrorLogRepo::create(&state.pool, &entry).await {
        tracing::warn!(
            error = %e,
            endpoint = %entry.endpoint,
            status_code = entry.status_code,
            "Failed to persist error log entry",
        );
    }

    response
}

/// The URI before any `nest` prefix was stripped.
fn original_uri(request: &Request) -> &axum::http::Uri {
    request
        .extensions()
        .get::<OriginalUri>()
        .map_or(request.uri(), |original| &original.0)
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Request context worth keeping with the entry, or `None` when empty.
fn request_details(request: &Request) -> Option<ErrorDetails> {
    let mut details = ErrorDetails::new();
    if let Some(query) = original_uri(request).query() {
        details.insert("query".into(), Value::String(query.to_string()));
    }
    if let Some(agent) = header_value(request, USER_AGENT.as_str()) {
        details.insert("user_agent".into(), Value::String(agent));
    }
    (!details.is_empty()).then_some(details)
}
