//! Application layer services.
//!
//! # Available Services
//!
//! - [`services::link_store::LinkStore`] - Short link creation and resolution

pub mod services;
