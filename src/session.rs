//! # Session
//!
//! Bearer-token session handling. The [`TokenStore`] trait is the capability
//! the HTTP client uses to remember the token a login produced. Callers
//! pass one in explicitly; the crate never touches ambient storage. A
//! process-local [`MemoryTokenStore`] is provided for the common case.
//!
//! Tokens are JWTs. Expiry is read from the unverified `exp` claim only;
//! verifying the signature is the server's job, the client just avoids
//! sending requests it knows will be rejected.

use std::sync::Mutex;

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use serde::Deserialize;

use crate::interfaces::users::TokenGrant;

/// Where the client keeps the session's token grant between requests.
///
/// Implementations must tolerate concurrent access: the client borrows the
/// store immutably from several async calls.
pub trait TokenStore: Send + Sync {
    /// Replace the stored grant with the one a login produced.
    fn put(&self, grant: TokenGrant);

    /// The stored grant, if a login has succeeded and the grant was not
    /// cleared since.
    fn grant(&self) -> Option<TokenGrant>;

    /// Forget the stored grant, as a logout does.
    fn clear(&self);
}

/// An in-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    grant: Mutex<Option<TokenGrant>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn put(&self, grant: TokenGrant) {
        if let Ok(mut guard) = self.grant.lock() {
            *guard = Some(grant);
        }
    }

    fn grant(&self) -> Option<TokenGrant> {
        self.grant.lock().ok().and_then(|guard| guard.clone())
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.grant.lock() {
            *guard = None;
        }
    }
}

/// The claims the client reads from a token. Everything else is opaque.
#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Whether a JWT is past its `exp` claim.
///
/// A token that cannot be decoded counts as expired: the client will not
/// send a credential it cannot read. A token without an `exp` claim never
/// expires.
#[must_use]
pub fn is_expired(jwt: &str) -> bool {
    let Some(claims) = decode_claims(jwt) else {
        tracing::warn!("session token could not be decoded, treating as expired");
        return true;
    };
    claims.exp.is_some_and(|exp| exp <= Utc::now().timestamp())
}

/// Decode the claims segment of a JWT without verifying the signature.
fn decode_claims(jwt: &str) -> Option<Claims> {
    let payload = jwt.split('.').nth(1)?;
    let bytes = Base64UrlUnpadded::decode_vec(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
