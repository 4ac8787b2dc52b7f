//! Domain layer containing business entities.
//!
//! - [`entities`] - Core business data structures

pub mod entities;
