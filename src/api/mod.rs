//! HTTP layer: the request pipeline and everything plugged into it.
//!
//! # Modules
//!
//! - [`pipeline`] - Stage/endpoint traits and pipeline composition
//! - [`middleware`] - Pipeline stages and router-wide tracing
//! - [`handlers`] - Terminal handlers backed by the link store
//! - [`dto`] - Response bodies

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
