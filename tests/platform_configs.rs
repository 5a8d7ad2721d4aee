#![cfg(feature = "client")]

//! Platform Configuration
//!
//! These tests demonstrate reading and updating platform configuration
//! against the (mock) platform API.

use septon_telemetry::client::Client;
use septon_telemetry::interfaces::platform::ConfigUpdates;
use test_utils::MockApi;

#[tokio::test]
async fn configs_roundtrip() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");
    client.login("admin", test_utils::PASSWORD.into()).await.expect("should log in");

    // --------------------------------------------------
    // The platform advertises its settable properties.
    // --------------------------------------------------
    let config = client.configs().await.expect("should fetch configs");
    assert!(config.keys.contains(&"encryption_scheme".to_string()));
    assert!(config.config.is_empty());

    // --------------------------------------------------
    // Updates are reflected in the next fetch.
    // --------------------------------------------------
    let mut updates = ConfigUpdates::new();
    updates.insert("encryption_scheme".to_string(), "aes-256-gcm".to_string());
    client.update_configs(&updates).await.expect("should update configs");

    let config = client.configs().await.expect("should fetch configs");
    assert_eq!(config.config.get("encryption_scheme"), Some(&"aes-256-gcm".to_string()));
}
