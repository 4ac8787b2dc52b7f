//! Handler for link shortening endpoint.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::shorten::{ShortenResponse, URL_FIELD};
use crate::api::pipeline::{Endpoint, RequestContext};
use crate::application::services::LinkStore;
use crate::error::AppError;

/// Creates a short link for the URL in the request body.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "url": "https://example.com", "short_url": "1a2b3c4d" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing, not a string, or rejected by
/// the store's validator. Returns 500 if the body was never parsed (a stage
/// is missing from the pipeline) or no free code could be generated.
pub struct CreateLink {
    store: Arc<LinkStore>,
}

impl CreateLink {
    pub fn new(store: Arc<LinkStore>) -> Self {
        Self { store }
    }
}

impl Endpoint for CreateLink {
    fn handle(&self, ctx: &RequestContext) -> Result<Response, AppError> {
        let body = ctx.json_body().ok_or_else(|| {
            tracing::error!("Request body was never parsed");
            AppError::misconfigured()
        })?;

        let url = body
            .get(URL_FIELD)
            .ok_or_else(|| AppError::missing_field(URL_FIELD))?
            .as_str()
            .ok_or_else(|| AppError::wrong_type(URL_FIELD, "string"))?;

        let link = self.store.create(url)?;

        tracing::debug!(code = %link.code, "Short link created");

        let response = ShortenResponse {
            url: link.target,
            short_url: link.code,
        };

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }
}
