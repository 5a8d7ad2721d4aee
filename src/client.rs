//! # Client
//!
//! The `client` module exposes the builders and the HTTP client used to call
//! the platform API. [`QueryBuilder`] assembles and validates a query
//! request from form state; [`Client`] (behind the `client` feature) sends
//! it and the user/platform administration requests over HTTP.
//!
//! ## Example Usage
//!
//! The following example demonstrates how to count wearable devices with a
//! low battery.
//!
//! ```no_run
//! use septon_telemetry::catalog::{DeviceCategory, Field, Operator};
//! use septon_telemetry::client::{Client, QueryBuilder};
//! use septon_telemetry::filters::DraftFilter;
//! use septon_telemetry::QueryKind;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::from_env()?;
//!     client.login("admin", "Str0ng!pass".into()).await?;
//!
//!     let request = QueryBuilder::new(QueryKind::Count)
//!         .category(DeviceCategory::Wearable)
//!         .filter(DraftFilter::with(Field::BatteryLevel, Operator::LessThan, "20"))
//!         .start_time("2024-01-01T00:00")
//!         .end_time("2024-01-02T00:00")
//!         .build()?;
//!
//!     let reply = client.execute(&request).await?;
//!     println!("{reply:?}");
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
mod http;
mod queries;

#[cfg(feature = "client")]
pub use self::http::{Client, DEFAULT_BASE_URL};
pub use self::queries::QueryBuilder;
