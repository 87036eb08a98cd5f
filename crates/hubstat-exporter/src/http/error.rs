use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hubstat_core::error::ClientCode;
use hubstat_core::HubStatError;

/// Per-request failure, rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub HubStatError);

impl From<HubStatError> for ApiError {
    fn from(e: HubStatError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::BindFailed | ClientCode::InvalidState | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::warn!(code = code.as_str(), error = %self.0, "monitoring request failed");
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
