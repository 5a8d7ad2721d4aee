#![cfg(feature = "client")]

//! Users Interface
//!
//! These tests demonstrate logging in, changing a password, and managing
//! researcher accounts against the (mock) platform API.

use septon_telemetry::Error;
use septon_telemetry::client::Client;
use septon_telemetry::interfaces::users::{ChangePassword, Researcher};
use septon_telemetry::session::TokenStore;
use test_utils::MockApi;

#[tokio::test]
async fn login_stores_grant() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");

    let grant = client.login("admin", test_utils::PASSWORD.into()).await.expect("should log in");
    assert_eq!(grant.token_type, "Bearer");
    assert_eq!(grant.expires_in, 3600);
    assert_eq!(client.store().grant(), Some(grant));
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");

    let err =
        client.login("admin", "wrong".into()).await.expect_err("should reject credentials");
    assert!(matches!(err, Error::Api { status: 401, .. }));
    assert!(client.store().grant().is_none());
}

#[tokio::test]
async fn change_password_accepted() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");

    let request = ChangePassword {
        username: "admin".into(),
        old_password: test_utils::PASSWORD.into(),
        new_password: "N3w!Passw0rd".into(),
    };
    client.change_password(&request).await.expect("should change password");
}

// The password policy is enforced before anything reaches the API.
#[tokio::test]
async fn weak_password_rejected_locally() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");

    let request = ChangePassword {
        username: "admin".into(),
        old_password: test_utils::PASSWORD.into(),
        new_password: "alllowercase".into(),
    };
    let err = client.change_password(&request).await.expect_err("should reject weak password");
    assert!(matches!(err, Error::WeakPassword));
}

#[tokio::test]
async fn researcher_lifecycle() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");
    client.login("admin", test_utils::PASSWORD.into()).await.expect("should log in");

    // --------------------------------------------------
    // Register a researcher and find it in the listing.
    // --------------------------------------------------
    let researcher = Researcher {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@medivale.example".into(),
        affiliation: "Medivale".into(),
    };
    client.register_researcher(&researcher).await.expect("should register");

    let listed = client.researchers().await.expect("should list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].details, researcher);

    // --------------------------------------------------
    // Delete it again and the listing is empty.
    // --------------------------------------------------
    client.remove_researcher(&listed[0].user_id).await.expect("should remove");
    let listed = client.researchers().await.expect("should list");
    assert!(listed.is_empty());
}

// Administration endpoints refuse to fire without a session.
#[tokio::test]
async fn researchers_require_session() {
    let api = MockApi::spawn().await.expect("should start mock api");
    let client = Client::new(&api.base_url()).expect("should create client");

    let err = client.researchers().await.expect_err("should be unauthorized");
    assert!(matches!(err, Error::Unauthorized(_)));
}
