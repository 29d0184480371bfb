//! Syndik Edge - portal routing and tenant resolution
//!
//! This crate decides, for every inbound request, which Syndik portal it
//! belongs to, which deployment environment is active, which locale
//! governs rendering, and whether the request passes through, is
//! internally rewritten, or is redirected to another origin.

pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use routing::{decide, Environment, Portal, RoutingDecision};
