//! Integration tests for Panier.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database
//! cargo run -p panier-cli -- migrate
//! cargo run -p panier-cli -- seed
//!
//! # Start both servers
//! cargo run -p panier-storefront
//! cargo run -p panier-admin
//!
//! # Run the ignored end-to-end tests
//! cargo test -p panier-integration-tests -- --ignored
//! ```
//!
//! The tests in `tests/` exercise the running binaries over HTTP and are
//! marked `#[ignore]`, so a plain `cargo test` never needs a live stack.

use reqwest::Client;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client for test requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn http_client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
