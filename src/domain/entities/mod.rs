//! Core domain entities.
//!
//! - [`ShortLink`] - A code-to-URL mapping

pub mod short_link;

pub use short_link::ShortLink;
