//! Axum router wiring.
//!
//! No explicit routes: the fallback catches every path and method. A panic in
//! a host-supplied collaborator becomes a 500 for that request only.

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use hubstat_core::HubStatError;

use crate::{app_state::AppState, http::handler, http::ApiError};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(handler::monitoring)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError(HubStatError::Internal(format!("monitoring handler panicked: {detail}"))).into_response()
}
