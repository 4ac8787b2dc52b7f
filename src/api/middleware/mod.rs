//! Pipeline stages and router-wide middleware.
//!
//! - [`content_type`] - tags every response as JSON
//! - [`method_gate`] - rejects unexpected HTTP methods
//! - [`json_body`] - decodes the request body into the pipeline context
//! - [`path_params`] - matches the path and captures named segments
//! - [`tracing`] - request/response logging for the whole router

pub mod content_type;
pub mod json_body;
pub mod method_gate;
pub mod path_params;
pub mod tracing;

pub use content_type::ContentType;
pub use json_body::ParseJsonBody;
pub use method_gate::MethodGate;
pub use path_params::PathParams;
