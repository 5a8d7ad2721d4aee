#![cfg(feature = "client")]

//! Average Queries
//!
//! These tests pin the exact request body an `AVERAGE` query produces and
//! demonstrate submitting one to the (mock) platform API.

use septon_telemetry::catalog::{DeviceCategory, Field, Operator};
use septon_telemetry::client::{Client, QueryBuilder};
use septon_telemetry::filters::DraftFilter;
use septon_telemetry::interfaces::queries::QueryReply;
use septon_telemetry::{Error, QueryKind};
use serde_json::json;
use test_utils::MockApi;

// The full wire shape: filters in edit order, category filter last, times
// normalized to RFC 3339 UTC with seconds.
#[test]
fn average_request_body() {
    let request = QueryBuilder::new(QueryKind::Average)
        .category(DeviceCategory::Wearable)
        .target_field(Field::UsageHours)
        .filter(DraftFilter::with(Field::BatteryLevel, Operator::LessThan, "20"))
        .start_time("2024-01-01T00:00")
        .end_time("2024-01-02T00:00")
        .build()
        .expect("should build");

    let body = serde_json::to_value(&request).expect("should serialize");
    assert_eq!(
        body,
        json!({
            "queryKind": "AVERAGE",
            "targetField": "USAGE_HOURS",
            "filters": [
                {"field": "battery_level", "integer_filter": {"value": 20, "operator": "LESS_THAN"}},
                {"field": "category", "enum_filter": {"value": "WEARABLE"}}
            ],
            "start_time": "2024-01-01T00:00:00Z",
            "end_time": "2024-01-02T00:00:00Z"
        })
    );
}

#[tokio::test]
async fn average_usage_hours() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");
    client.login("admin", test_utils::PASSWORD.into()).await.expect("should log in");

    let request = QueryBuilder::new(QueryKind::Average)
        .category(DeviceCategory::Wearable)
        .target_field(Field::UsageHours)
        .filter(DraftFilter::with(Field::BatteryLevel, Operator::LessThan, "20"))
        .start_time("2024-01-01T00:00")
        .end_time("2024-01-02T00:00")
        .build()
        .expect("should build");

    let reply = client.execute(&request).await.expect("should execute");
    let QueryReply::Average(average) = reply else {
        panic!("should be an average reply");
    };
    assert!((average.average_result - 12.5).abs() < f64::EPSILON);
}

// AVERAGE without a target field is caught before anything is sent.
#[test]
fn average_without_target_rejected() {
    let err = QueryBuilder::new(QueryKind::Average)
        .category(DeviceCategory::Wearable)
        .start_time("2024-01-01T00:00")
        .end_time("2024-01-02T00:00")
        .build()
        .expect_err("should be missing target field");

    assert!(matches!(err, Error::MissingRequiredFields(fields) if fields == vec!["target field"]));
}
