use std::{collections::BTreeMap, str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::nutype_string;

pub mod rules;

pub const PHONE_PATTERN: &str = r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$";

pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(PHONE_PATTERN).unwrap());

/// The keys of the service request form, in the order they are validated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FormField {
    Name,
    Phone,
    Location,
    ServiceType,
    Message,
    VehicleMake,
    VehicleModel,
    VehicleYear,
    LicensePlate,
}

impl FormField {
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Phone,
        Self::Location,
        Self::ServiceType,
        Self::Message,
        Self::VehicleMake,
        Self::VehicleModel,
        Self::VehicleYear,
        Self::LicensePlate,
    ];

    /// The form key of this field, as submitted by the browser.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Location => "location",
            Self::ServiceType => "service-type",
            Self::Message => "message",
            Self::VehicleMake => "vehicle-make",
            Self::VehicleModel => "vehicle-model",
            Self::VehicleYear => "vehicle-year",
            Self::LicensePlate => "license-plate",
        }
    }

    /// Whether this field only applies to oil change requests.
    pub fn is_vehicle_field(self) -> bool {
        matches!(
            self,
            Self::VehicleMake | Self::VehicleModel | Self::VehicleYear | Self::LicensePlate
        )
    }

    /// The message shown to the customer when this field fails with `error`.
    pub fn message(self, error: FieldError) -> &'static str {
        use FieldError::{Invalid, Required, TooLong};

        match (self, error) {
            (Self::Name, Required) => "Name is required.",
            (Self::Name, TooLong) => "Name is too long.",
            (Self::Phone, Required) => "Phone number is required.",
            (Self::Phone, Invalid) => "Invalid phone number format.",
            (Self::Location, Required) => "Location is required.",
            (Self::Location, TooLong) => "Location is too long.",
            (Self::ServiceType, Required) => "Please select a service type.",
            (Self::ServiceType, Invalid) => "Please select a valid service type.",
            (Self::Message, TooLong) => "Message is too long.",
            (Self::VehicleMake, Required) => "Vehicle make is required for oil change service.",
            (Self::VehicleMake, TooLong) => "Vehicle make is too long.",
            (Self::VehicleModel, Required) => "Vehicle model is required for oil change service.",
            (Self::VehicleModel, TooLong) => "Vehicle model is too long.",
            (Self::VehicleYear, Required) => "Vehicle year is required for oil change service.",
            (Self::VehicleYear, Invalid) => "Invalid vehicle year.",
            (Self::LicensePlate, Required) => "License plate is required for oil change service.",
            (Self::LicensePlate, TooLong) => "License plate is too long.",
            (_, Required) => "This field is required.",
            (_, Invalid) => "Invalid value.",
            (_, TooLong) => "Value is too long.",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    Required,
    Invalid,
    TooLong,
}

/// The complete set of field errors of a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid service request ({} field errors)", .0.len())]
pub struct FieldErrors(BTreeMap<FormField, FieldError>);

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first failing field in validation order.
    pub fn first(&self) -> Option<(FormField, FieldError)> {
        self.0.first_key_value().map(|(&f, &e)| (f, e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.0.iter().map(|(&f, &e)| (f, e))
    }

    /// Maps each failing form key to its customer-facing message.
    pub fn messages(&self) -> BTreeMap<&'static str, &'static str> {
        self.iter()
            .map(|(field, error)| (field.key(), field.message(error)))
            .collect()
    }
}

impl FromIterator<(FormField, FieldError)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (FormField, FieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    General,
    OilChange,
    TireService,
    BrakeService,
    BatteryReplacement,
    Diagnostics,
}

impl ServiceType {
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::OilChange,
        Self::TireService,
        Self::BrakeService,
        Self::BatteryReplacement,
        Self::Diagnostics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::OilChange => "oil-change",
            Self::TireService => "tire-service",
            Self::BrakeService => "brake-service",
            Self::BatteryReplacement => "battery-replacement",
            Self::Diagnostics => "diagnostics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General Maintenance",
            Self::OilChange => "Oil Change",
            Self::TireService => "Tire Service",
            Self::BrakeService => "Brake Service",
            Self::BatteryReplacement => "Battery Replacement",
            Self::Diagnostics => "Diagnostics",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown service type")]
pub struct UnknownServiceType;

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or(UnknownServiceType)
    }
}

nutype_string!(CustomerName(validate(
    not_empty,
    len_char_max = CustomerName::MAX_LENGTH
)));
impl CustomerName {
    pub const MAX_LENGTH: usize = 256;
}

nutype_string!(PhoneNumber(validate(regex = PHONE_REGEX)));

nutype_string!(ServiceLocation(validate(
    not_empty,
    len_char_max = ServiceLocation::MAX_LENGTH
)));
impl ServiceLocation {
    pub const MAX_LENGTH: usize = 256;
}

nutype_string!(ServiceRequestMessage(validate(
    not_empty,
    len_char_max = ServiceRequestMessage::MAX_LENGTH
)));
impl ServiceRequestMessage {
    pub const MAX_LENGTH: usize = 4096;
}

nutype_string!(VehicleMake(validate(
    not_empty,
    len_char_max = VehicleMake::MAX_LENGTH
)));
impl VehicleMake {
    pub const MAX_LENGTH: usize = 64;
}

nutype_string!(VehicleModel(validate(
    not_empty,
    len_char_max = VehicleModel::MAX_LENGTH
)));
impl VehicleModel {
    pub const MAX_LENGTH: usize = 64;
}

nutype_string!(LicensePlate(validate(
    not_empty,
    len_char_max = LicensePlate::MAX_LENGTH
)));
impl LicensePlate {
    pub const MAX_LENGTH: usize = 16;
}

#[nutype(
    validate(greater_or_equal = VehicleYear::MIN),
    derive(Debug, Clone, Copy, PartialEq, Eq, Deref, TryFrom, Display, Serialize, Deserialize)
)]
pub struct VehicleYear(u16);

impl VehicleYear {
    pub const MIN: u16 = 1900;
    pub const DIGITS: usize = 4;

    /// The latest acceptable model year: next year's models are already sold.
    pub fn max(current_year: i32) -> i32 {
        current_year + 1
    }

    /// Parses a year given as exactly four digits within
    /// `[MIN, current_year + 1]`.
    pub fn parse(raw: &str, current_year: i32) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() != Self::DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year = raw.parse::<u16>().ok()?;
        if i32::from(year) > Self::max(current_year) {
            return None;
        }
        Self::try_new(year).ok()
    }
}

/// The raw, untrusted values of a submitted service request form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequestForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub message: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub license_plate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub name: CustomerName,
    pub phone: PhoneNumber,
    pub location: ServiceLocation,
    pub service: ServiceDetails,
    pub message: Option<ServiceRequestMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceDetails {
    OilChange(Vehicle),
    Other(ServiceType),
}

impl ServiceDetails {
    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::OilChange(_) => ServiceType::OilChange,
            Self::Other(service_type) => *service_type,
        }
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        match self {
            Self::OilChange(vehicle) => Some(vehicle),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub make: VehicleMake,
    pub model: VehicleModel,
    pub year: VehicleYear,
    pub license_plate: LicensePlate,
}

impl ServiceRequestForm {
    pub fn value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Location => &self.location,
            FormField::ServiceType => &self.service_type,
            FormField::Message => &self.message,
            FormField::VehicleMake => &self.vehicle_make,
            FormField::VehicleModel => &self.vehicle_model,
            FormField::VehicleYear => &self.vehicle_year,
            FormField::LicensePlate => &self.license_plate,
        }
        .as_deref()
    }

    /// Validates every field of the form.
    ///
    /// All rules are evaluated, so a rejected form reports every failing field
    /// at once. Vehicle fields are only considered for oil change requests.
    pub fn validate(&self, current_year: i32) -> Result<ServiceRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.required(&mut errors, FormField::Name, FieldError::TooLong, |x| {
            CustomerName::try_new(x.to_owned())
        });
        let phone = self.required(&mut errors, FormField::Phone, FieldError::Invalid, |x| {
            PhoneNumber::try_new(x.to_owned())
        });
        let location = self.required(&mut errors, FormField::Location, FieldError::TooLong, |x| {
            ServiceLocation::try_new(x.to_owned())
        });
        let service_type =
            self.required(&mut errors, FormField::ServiceType, FieldError::Invalid, |x| {
                x.trim().parse::<ServiceType>()
            });

        let message = match self.value(FormField::Message).map(str::trim) {
            None | Some("") => None,
            Some(message) => ServiceRequestMessage::try_new(message.to_owned())
                .inspect_err(|_| errors.insert(FormField::Message, FieldError::TooLong))
                .ok(),
        };

        let service = match service_type {
            Some(ServiceType::OilChange) => self.vehicle(&mut errors, current_year),
            Some(service_type) => Some(ServiceDetails::Other(service_type)),
            None => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let (Some(name), Some(phone), Some(location), Some(service)) =
            (name, phone, location, service)
        else {
            return Err(errors);
        };

        Ok(ServiceRequest {
            name,
            phone,
            location,
            service,
            message,
        })
    }

    fn vehicle(&self, errors: &mut FieldErrors, current_year: i32) -> Option<ServiceDetails> {
        let make = self.required(errors, FormField::VehicleMake, FieldError::TooLong, |x| {
            VehicleMake::try_new(x.to_owned())
        });
        let model = self.required(errors, FormField::VehicleModel, FieldError::TooLong, |x| {
            VehicleModel::try_new(x.to_owned())
        });
        let year = self.required(errors, FormField::VehicleYear, FieldError::Invalid, |x| {
            VehicleYear::parse(x, current_year).ok_or(())
        });
        let license_plate =
            self.required(errors, FormField::LicensePlate, FieldError::TooLong, |x| {
                LicensePlate::try_new(x.to_owned())
            });

        Some(ServiceDetails::OilChange(Vehicle {
            make: make?,
            model: model?,
            year: year?,
            license_plate: license_plate?,
        }))
    }

    /// Checks that `field` is present and parses it, recording `on_error` if
    /// parsing fails.
    fn required<T, E>(
        &self,
        errors: &mut FieldErrors,
        field: FormField,
        on_error: FieldError,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Option<T> {
        let Some(value) = self.value(field).filter(|x| !x.trim().is_empty()) else {
            errors.insert(field, FieldError::Required);
            return None;
        };

        parse(value)
            .inspect_err(|_| errors.insert(field, on_error))
            .ok()
    }
}
