//! # hexlink
//!
//! An in-memory URL shortener service built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The short link entity
//! - **Application Layer** ([`application`]) - The concurrent link store
//! - **API Layer** ([`api`]) - Request pipeline, stages, handlers and DTOs
//! - **Utilities** ([`utils`]) - Code generation and URL validation
//!
//! ## Endpoints
//!
//! - `POST /shorten` with `{"url": "..."}` - returns `201 {"url", "short_url"}`
//! - `GET /{short_id}` - `302` redirect to the stored URL
//!
//! Every response, errors included, is `application/json`; errors carry
//! `{"error": "<message>"}`.
//!
//! ## Quick Start
//!
//! ```bash
//! CODE_LENGTH=8 LISTEN=127.0.0.1:8080 cargo run
//! curl -X POST localhost:8080/shorten -d '{"url":"https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkStore, StoreError};
    pub use crate::domain::entities::ShortLink;
    pub use crate::error::AppError;
    pub use crate::routes::{RouterOptions, app_router};
}
