//! Terminal pipeline handlers.
//!
//! Each handler owns a reference to the shared
//! [`LinkStore`](crate::application::services::LinkStore), handed over when
//! the router is built.

pub mod redirect;
pub mod shorten;

pub use redirect::ResolveLink;
pub use shorten::CreateLink;
