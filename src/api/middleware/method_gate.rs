//! HTTP method gate stage.

use axum::http::Method;

use crate::api::pipeline::{RequestContext, Stage};
use crate::error::AppError;

/// Lets through only requests using one HTTP method.
///
/// # Errors
///
/// Any other method halts with `405 Method Not Allowed`.
pub struct MethodGate {
    allowed: Method,
}

impl MethodGate {
    pub fn new(allowed: Method) -> Self {
        Self { allowed }
    }
}

impl Stage for MethodGate {
    fn name(&self) -> &'static str {
        "method_gate"
    }

    fn intercept(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        if *ctx.method() != self.allowed {
            tracing::debug!(method = %ctx.method(), allowed = %self.allowed, "Method not allowed");
            return Err(AppError::MethodNotAllowed);
        }

        Ok(())
    }
}
