use std::future::Future;

use autocare_models::email_address::EmailAddressWithName;
use autocare_templates_contracts::ServiceRequestTemplate;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateEmailService: Send + Sync + 'static {
    /// Notifies `recipient` about a new service request.
    fn send_service_request_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ServiceRequestTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockTemplateEmailService {
    pub fn with_send_service_request_email(
        mut self,
        recipient: EmailAddressWithName,
        data: ServiceRequestTemplate,
        result: bool,
    ) -> Self {
        self.expect_send_service_request_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_service_request_email_error(
        mut self,
        recipient: EmailAddressWithName,
        data: ServiceRequestTemplate,
    ) -> Self {
        self.expect_send_service_request_email()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "Connection refused (os error 111)"
                ))))
            });
        self
    }
}
