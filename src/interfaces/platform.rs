//! # Platform Interface
//!
//! Platform configuration administration. `GET /api/platform/configs`
//! returns the settable property names and the current values;
//! `POST /api/platform/configs` applies a batch of updates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The current platform configuration as returned by
/// `GET /api/platform/configs`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PlatformConfig {
    /// The property names the platform accepts updates for.
    pub keys: Vec<String>,

    /// The current value of each set property.
    pub config: BTreeMap<String, String>,
}

/// A batch of configuration updates, property name to new value. Sent as the
/// `POST /api/platform/configs` body.
pub type ConfigUpdates = BTreeMap<String, String>;
