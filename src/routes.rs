//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/shorten`     - create pipeline (`POST` only)
//! - `/{short_id}`  - resolve pipeline (`GET` only), mounted as the fallback
//!
//! The resolve pipeline owns every path except `/shorten`; its path stage
//! answers `404` for anything that is not exactly one segment.
//!
//! # Pipelines
//!
//! ```text
//! create:  ContentType -> MethodGate(POST) -> ParseJsonBody -> CreateLink
//! resolve: ContentType -> MethodGate(GET)  -> PathParams    -> ResolveLink
//! ```

use std::sync::Arc;

use axum::{Router, extract::Request, http::Method, routing::any};

use crate::api::handlers::redirect::SHORT_ID_PARAM;
use crate::api::handlers::{CreateLink, ResolveLink};
use crate::api::middleware::{ContentType, MethodGate, ParseJsonBody, PathParams, tracing};
use crate::api::pipeline::{DEFAULT_BODY_LIMIT, Pipeline};
use crate::application::services::LinkStore;

/// Router-level knobs that do not belong to the store.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Maximum accepted `/shorten` body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Builds the `POST /shorten` pipeline.
pub fn create_pipeline(store: Arc<LinkStore>, options: RouterOptions) -> Pipeline {
    Pipeline::builder(CreateLink::new(store))
        .stage(ContentType::json())
        .stage(MethodGate::new(Method::POST))
        .stage(ParseJsonBody)
        .body_limit(options.max_body_bytes)
        .build()
}

/// Builds the `GET /{short_id}` pipeline.
///
/// The body is never read by any stage, so nothing needs to be buffered.
pub fn resolve_pipeline(store: Arc<LinkStore>) -> Pipeline {
    Pipeline::builder(ResolveLink::new(store))
        .stage(ContentType::json())
        .stage(MethodGate::new(Method::GET))
        .stage(PathParams::new(&format!("/:{}", SHORT_ID_PARAM)))
        .body_limit(0)
        .build()
}

/// Constructs the application router around the shared store.
pub fn app_router(store: Arc<LinkStore>, options: RouterOptions) -> Router {
    let create = create_pipeline(Arc::clone(&store), options);
    let resolve = resolve_pipeline(store);

    Router::new()
        .route(
            "/shorten",
            any(move |request: Request| async move { create.serve(request).await }),
        )
        .fallback(move |request: Request| async move { resolve.serve(request).await })
        .layer(tracing::layer())
}
