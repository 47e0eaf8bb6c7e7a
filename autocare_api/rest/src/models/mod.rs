use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub mod service_request;

/// Body of every response to a form submission.
#[derive(Debug, Serialize)]
pub struct ApiOutcome {
    pub success: bool,
    pub message: &'static str,
    /// Message per invalid field, keyed by the field's form name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<&'static str, &'static str>>,
}

impl ApiOutcome {
    pub const INVALID_REQUEST_MESSAGE: &'static str = "Invalid request.";

    pub fn success(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            errors: None,
        }
    }

    pub fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            errors: None,
        }
    }

    pub fn with_errors(self, errors: BTreeMap<&'static str, &'static str>) -> Self {
        Self {
            errors: Some(errors),
            ..self
        }
    }

    pub fn into_response_with(self, code: StatusCode) -> Response {
        (code, Json(self)).into_response()
    }
}
