//! Routing and tenant-resolution core
//!
//! Pure decision functions, no I/O anywhere:
//! - [`environment`] classifies the deployment context
//! - [`portal`] maps hostnames to portals
//! - [`url_builder`] constructs cross-portal URLs
//! - [`engine`] produces the per-request routing decision

pub mod engine;
pub mod environment;
pub mod portal;
pub mod url_builder;

pub use engine::{decide, RoutingDecision};
pub use environment::Environment;
pub use portal::Portal;
pub use url_builder::BaseUrls;
