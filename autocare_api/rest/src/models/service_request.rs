use autocare_models::service_request::ServiceRequestForm;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Raw form submission, validated by the service request feature.
///
/// Values are taken as text, so `"vehicle-year": 2018` is validated like
/// `"vehicle-year": "2018"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiServiceRequest {
    #[serde(default, deserialize_with = "scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub vehicle_year: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub license_plate: Option<String>,
}

/// Accepts a string, number or boolean as its text; `null` is a missing value.
fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(value) => Ok(Some(value)),
        Value::Number(value) => Ok(Some(value.to_string())),
        Value::Bool(value) => Ok(Some(value.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(de::Error::custom("expected a string, number or boolean"))
        }
    }
}

impl From<ApiServiceRequest> for ServiceRequestForm {
    fn from(value: ApiServiceRequest) -> Self {
        Self {
            name: value.name,
            phone: value.phone,
            location: value.location,
            service_type: value.service_type,
            message: value.message,
            vehicle_make: value.vehicle_make,
            vehicle_model: value.vehicle_model,
            vehicle_year: value.vehicle_year,
            license_plate: value.license_plate,
        }
    }
}
