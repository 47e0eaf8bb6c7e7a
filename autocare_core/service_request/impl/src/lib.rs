use std::sync::Arc;

use autocare_core_service_request_contracts::{
    ServiceRequestFeatureService, ServiceRequestSubmitError,
};
use autocare_di::Build;
use autocare_email_contracts::template::TemplateEmailService;
use autocare_models::{
    email_address::EmailAddressWithName,
    service_request::{rules::FormRules, ServiceRequest, ServiceRequestForm},
};
use autocare_shared_contracts::time::TimeService;
use autocare_templates_contracts::{ServiceRequestTemplate, VehicleTemplate};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Build)]
pub struct ServiceRequestFeatureServiceImpl<Time, TemplateEmail> {
    time: Time,
    template_email: TemplateEmail,
    config: ServiceRequestFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceRequestFeatureConfig {
    /// Receives a notification for every accepted service request.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Time, TemplateEmail> ServiceRequestFeatureService
    for ServiceRequestFeatureServiceImpl<Time, TemplateEmail>
where
    Time: TimeService,
    TemplateEmail: TemplateEmailService,
{
    async fn submit(&self, form: ServiceRequestForm) -> Result<(), ServiceRequestSubmitError> {
        let request = form
            .validate(self.time.current_year())
            .inspect_err(|errors| debug!(?errors, "rejected invalid service request"))?;

        let service_type = request.service.service_type();
        let data = make_template(&request);

        match self
            .template_email
            .send_service_request_email((*self.config.recipient).clone(), &data)
            .await
        {
            Ok(true) => {
                info!(%service_type, "service request notification sent");
                Ok(())
            }
            Ok(false) => {
                error!(%service_type, "service request notification rejected by smtp server");
                Err(ServiceRequestSubmitError::Send)
            }
            Err(err) => {
                error!(%service_type, "failed to send service request notification: {err:#}");
                Err(ServiceRequestSubmitError::Send)
            }
        }
    }

    fn form_rules(&self) -> FormRules {
        FormRules::new(self.time.current_year())
    }
}

fn make_template(request: &ServiceRequest) -> ServiceRequestTemplate {
    ServiceRequestTemplate {
        name: request.name.to_string(),
        phone: request.phone.to_string(),
        location: request.location.to_string(),
        service_type: request.service.service_type().label().into(),
        vehicle: request.service.vehicle().map(|vehicle| VehicleTemplate {
            make: vehicle.make.to_string(),
            model: vehicle.model.to_string(),
            year: vehicle.year.to_string(),
            license_plate: vehicle.license_plate.to_string(),
        }),
        message: request
            .message
            .as_ref()
            .map_or_else(|| "N/A".into(), ToString::to_string),
    }
}
