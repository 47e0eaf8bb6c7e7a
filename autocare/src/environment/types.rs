use autocare_core_health_impl::HealthFeatureServiceImpl;
use autocare_core_service_request_impl::ServiceRequestFeatureServiceImpl;
use autocare_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use autocare_shared_impl::time::TimeServiceImpl;
use autocare_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = autocare_api_rest::RestServer<HealthFeature, ServiceRequestFeature>;

// Email
pub type Email = EmailServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Template
pub type Template = TemplateServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Email>;
pub type ServiceRequestFeature = ServiceRequestFeatureServiceImpl<Time, TemplateEmail>;
