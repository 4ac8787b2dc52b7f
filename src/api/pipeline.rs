//! Request pipeline: an ordered list of stages wrapped around an endpoint.
//!
//! A [`Stage`] inspects the [`RequestContext`] and either lets the request
//! through (optionally after attaching data to the context) or halts it with
//! an [`AppError`]. An [`Endpoint`] produces the final response.
//!
//! [`PipelineBuilder::build`] folds the stages, innermost first, into a
//! single handler. Stages therefore run in the order they were added and
//! nothing after a halt executes.
//!
//! ```rust,ignore
//! let pipeline = Pipeline::builder(CreateLink::new(store))
//!     .stage(ContentType::json())
//!     .stage(MethodGate::new(Method::POST))
//!     .stage(ParseJsonBody)
//!     .build();
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Request,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Default upper bound on buffered request bodies.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Per-request values shared between stages and the endpoint.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    path: String,
    raw_body: Option<Bytes>,
    json_body: Option<Map<String, Value>>,
    path_params: Option<HashMap<String, String>>,
    response_headers: HeaderMap,
}

impl RequestContext {
    /// `raw_body` is `None` when the body could not be read (too large, broken stream).
    pub fn new(method: Method, path: impl Into<String>, raw_body: Option<Bytes>) -> Self {
        Self {
            method,
            path: path.into(),
            raw_body,
            json_body: None,
            path_params: None,
            response_headers: HeaderMap::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn raw_body(&self) -> Option<&Bytes> {
        self.raw_body.as_ref()
    }

    pub fn json_body(&self) -> Option<&Map<String, Value>> {
        self.json_body.as_ref()
    }

    pub fn set_json_body(&mut self, body: Map<String, Value>) {
        self.json_body = Some(body);
    }

    /// Value of the named path segment, if a path stage extracted one.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    pub fn set_path_params(&mut self, params: HashMap<String, String>) {
        self.path_params = Some(params);
    }

    /// Headers applied to whatever response the request ends with.
    pub fn response_headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.response_headers
    }

    fn take_response_headers(&mut self) -> HeaderMap {
        std::mem::take(&mut self.response_headers)
    }
}

/// One link of the middleware chain.
pub trait Stage: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Passes the request on with `Ok(())` or halts it with an error.
    ///
    /// # Errors
    ///
    /// The returned [`AppError`] becomes the response; no later stage and no
    /// endpoint runs.
    fn intercept(&self, ctx: &mut RequestContext) -> Result<(), AppError>;
}

/// Terminal handler producing the substantive response.
pub trait Endpoint: Send + Sync {
    /// # Errors
    ///
    /// Any [`AppError`] is rendered as the JSON error response.
    fn handle(&self, ctx: &RequestContext) -> Result<Response, AppError>;
}

/// Composed form of a pipeline, also the unit the fold works on.
trait Handler: Send + Sync {
    fn call(&self, ctx: &mut RequestContext) -> Response;
}

struct Terminal<E>(E);

impl<E: Endpoint> Handler for Terminal<E> {
    fn call(&self, ctx: &mut RequestContext) -> Response {
        self.0
            .handle(ctx)
            .unwrap_or_else(IntoResponse::into_response)
    }
}

struct Intercept {
    stage: Box<dyn Stage>,
    next: Arc<dyn Handler>,
}

impl Handler for Intercept {
    fn call(&self, ctx: &mut RequestContext) -> Response {
        match self.stage.intercept(ctx) {
            Ok(()) => self.next.call(ctx),
            Err(e) => {
                tracing::debug!(
                    stage = self.stage.name(),
                    method = %ctx.method(),
                    path = ctx.path(),
                    error = %e,
                    "Request halted"
                );
                e.into_response()
            }
        }
    }
}

/// Collects stages in execution order before composing them.
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Stage>>,
    endpoint: Arc<dyn Handler>,
    body_limit: usize,
}

impl PipelineBuilder {
    /// Appends a stage; it runs after every stage added before it.
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Maximum number of body bytes buffered per request.
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Folds the stages around the endpoint into one handler.
    pub fn build(self) -> Pipeline {
        let handler = self
            .stages
            .into_iter()
            .rev()
            .fold(self.endpoint, |next, stage| {
                Arc::new(Intercept { stage, next }) as Arc<dyn Handler>
            });

        Pipeline {
            handler,
            body_limit: self.body_limit,
        }
    }
}

/// A fully composed, cheaply clonable request pipeline.
#[derive(Clone)]
pub struct Pipeline {
    handler: Arc<dyn Handler>,
    body_limit: usize,
}

impl Pipeline {
    /// Starts a pipeline terminating in `endpoint`.
    pub fn builder<E: Endpoint + 'static>(endpoint: E) -> PipelineBuilder {
        PipelineBuilder {
            stages: Vec::new(),
            endpoint: Arc::new(Terminal(endpoint)),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Runs `request` through the pipeline.
    ///
    /// The body is buffered up front; everything after that is synchronous.
    /// Headers set by stages are applied to the final response, including
    /// error responses from halted requests.
    pub async fn serve(&self, request: Request) -> Response {
        let (parts, body) = request.into_parts();

        let raw_body = match axum::body::to_bytes(body, self.body_limit).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read request body");
                None
            }
        };

        let mut ctx = RequestContext::new(parts.method, parts.uri.path(), raw_body);
        let mut response = self.handler.call(&mut ctx);
        response.headers_mut().extend(ctx.take_response_headers());
        response
    }
}
