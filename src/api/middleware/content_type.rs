//! Response content-type stage.

use axum::http::{HeaderValue, header};

use crate::api::pipeline::{RequestContext, Stage};
use crate::error::AppError;

/// Sets `Content-Type` on every response of the pipeline, error responses included.
///
/// Must be the first stage so that halts from later stages carry the header.
pub struct ContentType {
    value: HeaderValue,
}

impl ContentType {
    pub fn json() -> Self {
        Self {
            value: HeaderValue::from_static("application/json"),
        }
    }
}

impl Stage for ContentType {
    fn name(&self) -> &'static str {
        "content_type"
    }

    fn intercept(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        ctx.response_headers_mut()
            .insert(header::CONTENT_TYPE, self.value.clone());
        Ok(())
    }
}
