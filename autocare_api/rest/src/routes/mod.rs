use axum::{http::StatusCode, response::Response};

use crate::models::ApiOutcome;

pub mod health;
pub mod pages;
pub mod service_request;

pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    ApiOutcome::failure(SEND_FAILED_MESSAGE).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
