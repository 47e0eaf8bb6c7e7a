use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::Response,
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::ApiOutcome;

/// Deserializes a JSON body, or a urlencoded body when the form is posted
/// without javascript.
///
/// Any rejection is answered with `400 Invalid request.`.
#[derive(Debug, Clone, Copy)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let result = if is_form {
            Form::<T>::from_request(request, state)
                .await
                .map(|Form(value)| value)
                .map_err(|err| err.body_text())
        } else {
            Json::<T>::from_request(request, state)
                .await
                .map(|Json(value)| value)
                .map_err(|err| err.body_text())
        };

        result.map(Self).map_err(|err| {
            debug!(%err, "rejected request body");
            ApiOutcome::failure(ApiOutcome::INVALID_REQUEST_MESSAGE)
                .into_response_with(StatusCode::BAD_REQUEST)
        })
    }
}
