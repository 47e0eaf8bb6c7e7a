use std::sync::Arc;

use autocare_config::Config;
use autocare_core_health_impl::HealthFeatureConfig;
use autocare_core_service_request_impl::ServiceRequestFeatureConfig;
use autocare_di::provider;
use types::Email;

pub mod types;

provider! {
    /// Provides every service of the running server
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            HealthFeatureConfig,
            ServiceRequestFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Provides the feature configs derived from the config file
    pub ConfigProvider {
        health_feature_config: HealthFeatureConfig,
        service_request_feature_config: ServiceRequestFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        let service_request_feature_config = ServiceRequestFeatureConfig {
            recipient: Arc::new(config.service_request.recipient.clone()),
        };

        Self {
            _cache: Default::default(),
            health_feature_config,
            service_request_feature_config,
        }
    }
}
