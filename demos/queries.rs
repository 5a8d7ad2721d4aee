//! Example demonstrating how to build and submit telemetry queries.
//!
//! Expects a platform API at `SEPTON_API_URL` (default
//! `http://localhost:8088`) and credentials in `SEPTON_USER` /
//! `SEPTON_PASSWORD`.

use septon_telemetry::QueryKind;
use septon_telemetry::catalog::{DeviceCategory, Field, Operator};
use septon_telemetry::client::{Client, QueryBuilder};
use septon_telemetry::filters::DraftFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let username = std::env::var("SEPTON_USER").unwrap_or_else(|_| "admin".into());
    let password = std::env::var("SEPTON_PASSWORD").unwrap_or_default();

    let client = Client::from_env()?;
    client.login(&username, password.as_str().into()).await?;

    // how many wearables reported a low battery in January?
    let count = QueryBuilder::new(QueryKind::Count)
        .category(DeviceCategory::Wearable)
        .filter(DraftFilter::with(Field::BatteryLevel, Operator::LessThan, "20"))
        .start_time("2024-01-01T00:00")
        .end_time("2024-02-01T00:00")
        .build()?;
    let reply = client.execute(&count).await?;
    println!("low-battery wearables: {reply:?}");

    // and their average usage hours
    let average = QueryBuilder::new(QueryKind::Average)
        .category(DeviceCategory::Wearable)
        .target_field(Field::UsageHours)
        .filter(DraftFilter::with(Field::BatteryLevel, Operator::LessThan, "20"))
        .start_time("2024-01-01T00:00")
        .end_time("2024-02-01T00:00")
        .build()?;
    let reply = client.execute(&average).await?;
    println!("average usage hours: {reply:?}");

    Ok(())
}
