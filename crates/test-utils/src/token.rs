//! Session token minting for tests.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use serde_json::json;

/// Mint an unsigned JWT whose `exp` claim is `lifetime_secs` from now. A
/// negative lifetime produces an already-expired token.
#[must_use]
pub fn mint(lifetime_secs: i64) -> String {
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({
        "sub": "admin",
        "iss": "septon-platform",
        "exp": Utc::now().timestamp() + lifetime_secs,
    });
    let payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
    format!("{header}.{payload}.test-signature")
}
