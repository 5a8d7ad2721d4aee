//! # Mock Platform API
//!
//! Test support: an in-process mock of the platform API for exercising the
//! client end to end, and helpers for minting session tokens.

mod server;
mod token;

pub use self::server::{MockApi, PASSWORD};
pub use self::token::mint;
