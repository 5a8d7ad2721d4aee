//! # Field Catalog
//!
//! The static catalog of queryable device fields. Every filterable attribute
//! a device reports is described here by a [`FieldSpec`]: its value type and
//! the comparison operator a form should preselect. The catalog is fixed at
//! compile time, so an unknown field name can only come from a caller that has
//! drifted from the catalog, so [`lookup`] failures are contract violations
//! rather than user input errors.

use std::fmt;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A queryable device field.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    /// The hospital the device is registered to.
    Hospital,
    /// The device manufacturer.
    Manufacturer,
    /// The manufacturer's model name.
    Model,
    /// The firmware version currently installed.
    FirmwareVersion,
    /// The manufacturer's device type designation.
    DeviceType,
    /// When the device was produced.
    ProductionDate,
    /// When the device was last serviced.
    LastServiceDate,
    /// When the device's warranty runs out.
    WarrantyExpiryDate,
    /// When the device last synchronized telemetry.
    LastSyncTime,
    /// Accumulated hours of use.
    UsageHours,
    /// Battery charge percentage at last sync.
    BatteryLevel,
    /// How often the device synchronizes, in seconds.
    SyncFrequencySeconds,
    /// Whether the device is in active service.
    ActiveStatus,
    /// The medical speciality the device is assigned to.
    Speciality,
    /// The device category (portable or wearable).
    Category,
}

/// Value types a field can hold, each with its own operator set and wire
/// representation.
#[derive(Clone, Copy, Debug, Display, Deserialize, Serialize, PartialEq, Eq)]
pub enum ValueType {
    /// Free text.
    #[display("text")]
    String,

    /// A whole number.
    #[display("number")]
    Integer,

    /// True or false.
    #[display("boolean")]
    Bool,

    /// A point in time.
    #[display("timestamp")]
    Timestamp,

    /// One of the closed list of medical specialities.
    #[display("medical speciality")]
    MedicalSpeciality,

    /// One of the closed list of device categories.
    #[display("device category")]
    DeviceCategory,
}

/// Comparison operators, scoped per value type by [`operators_for`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Equal to the value.
    #[default]
    Equals,
    /// Text contains the value.
    Contains,
    /// Text starts with the value.
    StartsWith,
    /// Text ends with the value.
    EndsWith,
    /// Greater than the value.
    GreaterThan,
    /// Less than the value.
    LessThan,
    /// Greater than or equal to the value.
    GreaterThanOrEqual,
    /// Less than or equal to the value.
    LessThanOrEqual,
    /// Before the timestamp.
    Before,
    /// After the timestamp.
    After,
}

impl Operator {
    /// The operator's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::Contains => "CONTAINS",
            Self::StartsWith => "STARTS_WITH",
            Self::EndsWith => "ENDS_WITH",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static descriptor of one catalog field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// The catalog name, e.g. `BATTERY_LEVEL`.
    pub name: &'static str,

    /// The type of value the field holds.
    pub value_type: ValueType,

    /// The operator a form should preselect for the field.
    pub default_operator: Operator,
}

impl Field {
    /// Every field in the catalog, in form display order.
    pub const ALL: [Self; 15] = [
        Self::Hospital,
        Self::Manufacturer,
        Self::Model,
        Self::FirmwareVersion,
        Self::DeviceType,
        Self::ProductionDate,
        Self::LastServiceDate,
        Self::WarrantyExpiryDate,
        Self::LastSyncTime,
        Self::UsageHours,
        Self::BatteryLevel,
        Self::SyncFrequencySeconds,
        Self::ActiveStatus,
        Self::Speciality,
        Self::Category,
    ];

    /// The field's catalog name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hospital => "HOSPITAL",
            Self::Manufacturer => "MANUFACTURER",
            Self::Model => "MODEL",
            Self::FirmwareVersion => "FIRMWARE_VERSION",
            Self::DeviceType => "DEVICE_TYPE",
            Self::ProductionDate => "PRODUCTION_DATE",
            Self::LastServiceDate => "LAST_SERVICE_DATE",
            Self::WarrantyExpiryDate => "WARRANTY_EXPIRY_DATE",
            Self::LastSyncTime => "LAST_SYNC_TIME",
            Self::UsageHours => "USAGE_HOURS",
            Self::BatteryLevel => "BATTERY_LEVEL",
            Self::SyncFrequencySeconds => "SYNC_FREQUENCY_SECONDS",
            Self::ActiveStatus => "ACTIVE_STATUS",
            Self::Speciality => "SPECIALITY",
            Self::Category => "CATEGORY",
        }
    }

    /// The field name as it appears in serialized filters.
    #[must_use]
    pub fn wire_name(self) -> String {
        self.name().to_ascii_lowercase()
    }

    /// The type of value the field holds.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Hospital
            | Self::Manufacturer
            | Self::Model
            | Self::FirmwareVersion
            | Self::DeviceType => ValueType::String,
            Self::ProductionDate
            | Self::LastServiceDate
            | Self::WarrantyExpiryDate
            | Self::LastSyncTime => ValueType::Timestamp,
            Self::UsageHours | Self::BatteryLevel | Self::SyncFrequencySeconds => {
                ValueType::Integer
            }
            Self::ActiveStatus => ValueType::Bool,
            Self::Speciality => ValueType::MedicalSpeciality,
            Self::Category => ValueType::DeviceCategory,
        }
    }

    /// The field's full static descriptor.
    #[must_use]
    pub const fn spec(self) -> FieldSpec {
        FieldSpec {
            name: self.name(),
            value_type: self.value_type(),
            default_operator: default_operator_for(self.value_type()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Look up a field's descriptor by catalog name.
///
/// # Errors
///
/// Fails with [`Error::UnknownField`] when the name is not in the catalog.
/// The UI only ever offers catalog members, so treat this as a programming
/// error.
pub fn lookup(name: &str) -> Result<FieldSpec> {
    Field::from_str(name).map(Field::spec)
}

const STRING_OPERATORS: [Operator; 4] =
    [Operator::Equals, Operator::Contains, Operator::StartsWith, Operator::EndsWith];

const INTEGER_OPERATORS: [Operator; 5] = [
    Operator::Equals,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::GreaterThanOrEqual,
    Operator::LessThanOrEqual,
];

const TIMESTAMP_OPERATORS: [Operator; 3] = [Operator::Equals, Operator::Before, Operator::After];

const EQUALS_ONLY: [Operator; 1] = [Operator::Equals];

/// The operators a form should offer for a value type, in display order.
#[must_use]
pub const fn operators_for(value_type: ValueType) -> &'static [Operator] {
    match value_type {
        ValueType::String => &STRING_OPERATORS,
        ValueType::Integer => &INTEGER_OPERATORS,
        ValueType::Timestamp => &TIMESTAMP_OPERATORS,
        ValueType::Bool | ValueType::MedicalSpeciality | ValueType::DeviceCategory => &EQUALS_ONLY,
    }
}

/// The operator a form should preselect for a value type.
#[must_use]
pub const fn default_operator_for(_value_type: ValueType) -> Operator {
    Operator::Equals
}

/// The category a device belongs to.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceCategory {
    /// A device moved between patients or rooms.
    Portable,

    /// A device worn by a patient.
    Wearable,
}

impl DeviceCategory {
    /// Every category, in form display order.
    pub const ALL: [Self; 2] = [Self::Portable, Self::Wearable];

    /// The category name shown in selection lists.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Portable => "Portable Device",
            Self::Wearable => "Wearable Device",
        }
    }

    /// The category's wire value, used by the synthesized category filter.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Portable => "PORTABLE",
            Self::Wearable => "WEARABLE",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DeviceCategory {
    type Err = Error;

    /// Accepts the display name, the wire value, or the normalized option
    /// form (`WEARABLE_DEVICE`).
    fn from_str(s: &str) -> Result<Self> {
        match normalize_option(s).as_str() {
            "PORTABLE" | "PORTABLE_DEVICE" => Ok(Self::Portable),
            "WEARABLE" | "WEARABLE_DEVICE" => Ok(Self::Wearable),
            _ => Err(Error::InvalidEnumValue {
                value: s.to_string(),
                value_type: ValueType::DeviceCategory,
            }),
        }
    }
}

/// Medical specialities a device can be assigned to, as shown in selection
/// lists. Enum filter values are the normalized form of these names.
pub const MEDICAL_SPECIALITIES: [&str; 55] = [
    "Allergy and Immunology",
    "Anesthesiology",
    "Dermatology",
    "Diagnostic Radiology",
    "Emergency Medicine",
    "Family Medicine",
    "Internal Medicine",
    "Medical Genetics",
    "Neurology",
    "Nuclear Medicine",
    "Obstetrics and Gynecology",
    "Ophthalmology",
    "Pathology",
    "Pediatrics",
    "Physical Medicine and Rehabilitation",
    "Preventive Medicine",
    "Psychiatry",
    "Radiation Oncology",
    "Surgery",
    "Urology",
    "Cardiology",
    "Endocrinology",
    "Gastroenterology",
    "Geriatrics",
    "Hematology",
    "Infectious Disease",
    "Nephrology",
    "Oncology",
    "Pulmonology",
    "Rheumatology",
    "Orthopedics",
    "Otolaryngology",
    "Plastic Surgery",
    "Vascular Surgery",
    "Thoracic Surgery",
    "Neurosurgery",
    "Podiatry",
    "Dentistry",
    "Oral and Maxillofacial Surgery",
    "Audiology",
    "Speech Language Pathology",
    "Occupational Therapy",
    "Physical Therapy",
    "Chiropractic",
    "Pain Medicine",
    "Sports Medicine",
    "Palliative Care",
    "Pharmacology",
    "Nutrition",
    "Midwifery",
    "Neonatology",
    "Critical Care",
    "Hospice and Palliative Medicine",
    "Sleep Medicine",
    "Clinical Neurophysiology",
];

/// Normalize an enum option for the wire: upper-cased, spaces replaced with
/// underscores.
#[must_use]
pub fn normalize_option(option: &str) -> String {
    option.trim().to_ascii_uppercase().replace(' ', "_")
}

/// Whether a normalized value names one of the known medical specialities.
#[must_use]
pub fn is_medical_speciality(normalized: &str) -> bool {
    MEDICAL_SPECIALITIES.iter().any(|option| normalize_option(option) == normalized)
}
