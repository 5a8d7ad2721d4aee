//! # SEPTON Telemetry Client
//!
//! A client SDK for the SEPTON medical-device telemetry platform. The
//! platform aggregates telemetry reported by portable and wearable medical
//! devices and exposes an HTTP API for running aggregate queries over it,
//! alongside user and platform administration endpoints.
//!
//! The heart of the crate is a typed query-filter builder: a static catalog
//! of queryable device fields ([`catalog`]), a draft-filter list owned by a
//! form session ([`filters`]), and a [`client::QueryBuilder`] that turns the
//! drafts into the JSON request body the query API expects. Everything the
//! builder produces is validated before it leaves the process; a malformed
//! filter is reported to the caller, never sent.
//!
//! The [`client`] module also provides an async HTTP [`client::Client`] for
//! submitting queries and calling the user and platform administration
//! endpoints. It is gated behind the `client` feature (enabled by default).

pub mod catalog;
pub mod client;
mod error;
pub mod filters;
pub mod interfaces;
mod schema;
pub mod session;
mod utils;

use ::serde::{Deserialize, Serialize};
use derive_more::Display;

pub use crate::error::Error;

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The kind of aggregate a query computes.
#[derive(Clone, Copy, Debug, Default, Display, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryKind {
    /// Count the devices matching the filters.
    #[default]
    Count,

    /// Average a numeric field over the devices matching the filters.
    Average,

    /// Count devices grouped by the values of a field (histogram).
    GroupedCount,
}

impl QueryKind {
    /// Whether this kind of query aggregates over a target field.
    #[must_use]
    pub const fn requires_target(self) -> bool {
        matches!(self, Self::Average | Self::GroupedCount)
    }
}

// Custom serialization functions.
mod serde {
    use chrono::SecondsFormat::Secs;
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    /// Force serializing to an RFC 3339 string with seconds precision and a
    /// `Z` UTC designator, the format the query API expects.
    pub fn rfc3339_secs<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339_opts(Secs, true);
        serializer.serialize_str(&s)
    }
}
