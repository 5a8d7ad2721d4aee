//! # Errors
//!
//! Validation errors are user-correctable and their `Display` output is
//! intended to be shown to the user verbatim, one at a time. `UnknownField`
//! and `IndexOutOfRange` indicate the caller and the catalog have gone out of
//! sync and should be treated as programming errors rather than input errors.

use thiserror::Error;

use crate::catalog::{Operator, ValueType};

/// Telemetry client errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The named field is not in the static catalog. The UI only ever offers
    /// catalog members, so this is a contract violation, not user input.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A draft filter index did not refer to an entry in the list.
    #[error("filter index {index} out of range for list of {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length of the filter list at the time of the call.
        len: usize,
    },

    /// A draft filter has no field selected and cannot be serialized.
    #[error("a filter is missing its field selection")]
    IncompleteFilter,

    /// The chosen operator is not valid for the field's value type.
    #[error("operator {operator} cannot be applied to a {value_type} field")]
    InvalidOperator {
        /// The operator on the draft filter.
        operator: Operator,
        /// The value type of the selected field.
        value_type: ValueType,
    },

    /// An integer filter value did not parse as a base-10 integer.
    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),

    /// A boolean filter value was not the literal `true` or `false`.
    #[error("'{0}' is not true or false")]
    InvalidBool(String),

    /// A timestamp value was not a recognizable date-time.
    #[error("'{0}' is not a valid date and time")]
    InvalidTimestamp(String),

    /// An enum filter value is not one of the closed option list.
    #[error("'{value}' is not a known {value_type} option")]
    InvalidEnumValue {
        /// The value after normalization.
        value: String,
        /// The enum value type the option list belongs to.
        value_type: ValueType,
    },

    /// One or more required query inputs are empty.
    #[error("please fill in all fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),

    /// A new password did not meet the platform password policy.
    #[error(
        "password must be at least 8 characters long and contain at least one uppercase letter, \
         one lowercase letter, one number, and one special character"
    )]
    WeakPassword,

    /// No usable session token: never issued, cleared, or past its expiry.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The API replied with a non-success status.
    #[error("api error {status}: {detail}")]
    Api {
        /// The HTTP status code of the reply.
        status: u16,
        /// The reply body, if any.
        detail: String,
    },

    /// The request could not be delivered.
    #[cfg(feature = "client")]
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client encountered an unexpected condition in a dependant library.
    #[error("internal error: {0}")]
    Server(String),
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Self::Server(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Server(error.to_string())
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(error: http::uri::InvalidUri) -> Self {
        Self::Server(error.to_string())
    }
}
