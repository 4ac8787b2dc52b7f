//! JSON request body stage.

use serde_json::{Map, Value};

use crate::api::pipeline::{RequestContext, Stage};
use crate::error::AppError;

/// Decodes the request body as a JSON object into the context.
///
/// An empty body, a document that is not an object, invalid JSON and a body
/// that could not be read all halt with `400 Bad Request`.
pub struct ParseJsonBody;

impl Stage for ParseJsonBody {
    fn name(&self) -> &'static str {
        "json_body"
    }

    fn intercept(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        let raw = ctx.raw_body().ok_or(AppError::MalformedRequest)?;

        let body: Map<String, Value> = serde_json::from_slice(raw).map_err(|e| {
            tracing::debug!(error = %e, "Request body is not a JSON object");
            AppError::MalformedRequest
        })?;

        ctx.set_json_body(body);
        Ok(())
    }
}
