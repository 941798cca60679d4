//! Twitter API module.
//!
//! This module provides:
//! - The `TwitterApi` seam the backup engine runs against
//! - An HTTP implementation of it
//! - OAuth 1.0a request signing
//! - Request parameter and response types

pub mod auth;
pub mod client;
pub mod types;

pub use auth::OAuthSigner;
pub use client::{TwitterApi, TwitterClient};
pub use types::*;
