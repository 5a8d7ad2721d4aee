#![cfg(feature = "client")]

//! Grouped-Count Queries
//!
//! These tests demonstrate submitting a `GROUPED_COUNT` (histogram) query,
//! which is served by its own endpoint.

use septon_telemetry::QueryKind;
use septon_telemetry::catalog::{DeviceCategory, Field, Operator};
use septon_telemetry::client::{Client, QueryBuilder};
use septon_telemetry::filters::DraftFilter;
use septon_telemetry::interfaces::queries::QueryReply;
use test_utils::MockApi;

#[tokio::test]
async fn firmware_version_histogram() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");
    client.login("admin", test_utils::PASSWORD.into()).await.expect("should log in");

    let request = QueryBuilder::new(QueryKind::GroupedCount)
        .category(DeviceCategory::Portable)
        .target_field(Field::FirmwareVersion)
        .filter(DraftFilter::with(Field::Speciality, Operator::Equals, "Cardiology"))
        .start_time("2024-01-01T00:00")
        .end_time("2024-06-01T00:00")
        .build()
        .expect("should build");

    assert_eq!(request.endpoint(), "/api/queries/histogram");

    let reply = client.execute(&request).await.expect("should execute");
    let QueryReply::GroupedCount(grouped) = reply else {
        panic!("should be a grouped-count reply");
    };
    assert_eq!(grouped.groups.get("v1.0.0"), Some(&3));
    assert_eq!(grouped.groups.get("v1.1.0"), Some(&5));
}
