//! Serializable description of the service request validation rules.
//!
//! The browser interprets these rules to give immediate feedback. They are
//! derived from the same constants `ServiceRequestForm::validate` uses, the
//! server remains the only authority.

use serde::Serialize;

use super::{
    CustomerName, FieldError, FormField, LicensePlate, ServiceLocation, ServiceRequestMessage,
    ServiceType, VehicleMake, VehicleModel, VehicleYear, PHONE_PATTERN,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRules {
    pub fields: Vec<FieldRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub field: FormField,
    pub requirement: Requirement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<YearRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
    pub messages: FieldMessages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Requirement {
    /// The field must always be filled in.
    Always,
    /// The field must be filled in for oil change requests and is ignored
    /// otherwise.
    OilChange,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRule {
    pub digits: usize,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessages {
    pub required: &'static str,
    pub invalid: &'static str,
    pub too_long: &'static str,
}

impl FormRules {
    pub fn new(current_year: i32) -> Self {
        Self {
            fields: FormField::ALL
                .into_iter()
                .map(|field| FieldRule::new(field, current_year))
                .collect(),
        }
    }

    pub fn get(&self, field: FormField) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.field == field)
    }
}

impl FieldRule {
    fn new(field: FormField, current_year: i32) -> Self {
        let requirement = match field {
            FormField::Message => Requirement::Optional,
            f if f.is_vehicle_field() => Requirement::OilChange,
            _ => Requirement::Always,
        };

        let max_length = match field {
            FormField::Name => Some(CustomerName::MAX_LENGTH),
            FormField::Location => Some(ServiceLocation::MAX_LENGTH),
            FormField::Message => Some(ServiceRequestMessage::MAX_LENGTH),
            FormField::VehicleMake => Some(VehicleMake::MAX_LENGTH),
            FormField::VehicleModel => Some(VehicleModel::MAX_LENGTH),
            FormField::LicensePlate => Some(LicensePlate::MAX_LENGTH),
            FormField::Phone | FormField::ServiceType | FormField::VehicleYear => None,
        };

        Self {
            field,
            requirement,
            max_length,
            pattern: (field == FormField::Phone).then_some(PHONE_PATTERN),
            year: (field == FormField::VehicleYear).then(|| YearRule {
                digits: VehicleYear::DIGITS,
                min: VehicleYear::MIN.into(),
                max: VehicleYear::max(current_year),
            }),
            options: (field == FormField::ServiceType)
                .then(|| ServiceType::ALL.into_iter().map(ServiceType::as_str).collect()),
            messages: FieldMessages {
                required: field.message(FieldError::Required),
                invalid: field.message(FieldError::Invalid),
                too_long: field.message(FieldError::TooLong),
            },
        }
    }
}
