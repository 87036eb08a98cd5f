//! Request handler.
//!
//! - non-GET : 400, plain text, store untouched
//! - GET     : snapshot-and-reset, 200 application/json

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use hubstat_core::error::{HubStatError, Result};

use crate::app_state::AppState;
use crate::http::ApiError;

pub const REJECT_BODY: &str = "Only get supported";

pub async fn monitoring(
    method: Method,
    State(state): State<AppState>,
) -> std::result::Result<Response, ApiError> {
    if method != Method::GET {
        tracing::debug!(%method, "monitoring request rejected");
        return Ok((
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            REJECT_BODY,
        )
            .into_response());
    }

    let body = render_snapshot(&state)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

fn render_snapshot(state: &AppState) -> Result<Vec<u8>> {
    let snapshot = state.reader().take_snapshot()?;
    serde_json::to_vec(&snapshot)
        .map_err(|e| HubStatError::Internal(format!("snapshot encode failed: {e}")))
}
