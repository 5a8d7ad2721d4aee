//! # Interfaces
//!
//! Wire-level request and reply types for the platform API, grouped by
//! interface: `Queries` for telemetry aggregates, `Users` for authentication
//! and researcher management, and `Platform` for platform configuration.
//!
//! Each type serializes to exactly the JSON the API exchanges. Requests are
//! built either directly or through the builders in [`crate::client`], sent
//! with [`crate::client::Client`], and replies deserialize back into the
//! types here.

pub mod platform;
pub mod queries;
pub mod users;
