use std::sync::Arc;

use autocare_core_service_request_contracts::{
    ServiceRequestFeatureService, ServiceRequestSubmitError,
};
use autocare_models::service_request::FieldErrors;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};

use super::SEND_FAILED_MESSAGE;
use crate::{
    extractors::json_or_form::JsonOrForm,
    models::{service_request::ApiServiceRequest, ApiOutcome},
};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

pub fn router(service: Arc<impl ServiceRequestFeatureService>) -> Router<()> {
    Router::new()
        .route("/send-contact-form", routing::post(submit))
        .route("/form-rules", routing::get(form_rules))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ServiceRequestFeatureService>>,
    JsonOrForm(request): JsonOrForm<ApiServiceRequest>,
) -> Response {
    match service.submit(request.into()).await {
        Ok(()) => ApiOutcome::success(SUCCESS_MESSAGE).into_response_with(StatusCode::OK),
        Err(ServiceRequestSubmitError::Invalid(errors)) => invalid(&errors),
        Err(ServiceRequestSubmitError::Send) => ApiOutcome::failure(SEND_FAILED_MESSAGE)
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

fn invalid(errors: &FieldErrors) -> Response {
    let message = errors
        .first()
        .map(|(field, error)| field.message(error))
        .unwrap_or(ApiOutcome::INVALID_REQUEST_MESSAGE);

    ApiOutcome::failure(message)
        .with_errors(errors.messages())
        .into_response_with(StatusCode::BAD_REQUEST)
}

async fn form_rules(service: State<Arc<impl ServiceRequestFeatureService>>) -> Response {
    Json(service.form_rules()).into_response()
}
