use std::future::Future;

use autocare_models::service_request::{rules::FormRules, FieldErrors, ServiceRequestForm};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ServiceRequestFeatureService: Send + Sync + 'static {
    /// Validates a submitted form and notifies the shop about it.
    ///
    /// Nothing is stored; submitting the same form twice sends two
    /// notifications.
    fn submit(
        &self,
        form: ServiceRequestForm,
    ) -> impl Future<Output = Result<(), ServiceRequestSubmitError>> + Send;

    /// Returns the validation rules for the browser.
    fn form_rules(&self) -> FormRules;
}

#[derive(Debug, Error)]
pub enum ServiceRequestSubmitError {
    #[error("Invalid service request.")]
    Invalid(#[from] FieldErrors),
    #[error("Failed to send service request.")]
    Send,
}

#[cfg(feature = "mock")]
impl MockServiceRequestFeatureService {
    pub fn with_submit(
        mut self,
        form: ServiceRequestForm,
        result: Result<(), ServiceRequestSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_form_rules(mut self, rules: FormRules) -> Self {
        self.expect_form_rules().once().return_const(rules);
        self
    }
}
