//! Handler for short URL redirect.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::pipeline::{Endpoint, RequestContext};
use crate::application::services::LinkStore;
use crate::error::AppError;

/// Path parameter holding the short code.
pub const SHORT_ID_PARAM: &str = "short_id";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL, verbatim.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown (lookups are case-sensitive).
pub struct ResolveLink {
    store: Arc<LinkStore>,
}

impl ResolveLink {
    pub fn new(store: Arc<LinkStore>) -> Self {
        Self { store }
    }
}

impl Endpoint for ResolveLink {
    fn handle(&self, ctx: &RequestContext) -> Result<Response, AppError> {
        let code = ctx.path_param(SHORT_ID_PARAM).ok_or_else(|| {
            tracing::error!(
                method = %ctx.method(),
                path = ctx.path(),
                "Path params parsing misconfigured"
            );
            AppError::misconfigured()
        })?;

        let target = self.store.resolve(code)?;

        let location = HeaderValue::try_from(target).map_err(|e| {
            tracing::error!(code, error = %e, "Stored URL is not a valid header value");
            AppError::internal("Internal server error")
        })?;

        Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
    }
}
