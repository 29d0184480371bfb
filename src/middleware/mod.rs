//! HTTP middleware for the Syndik edge service
//!
//! Layer order is part of the contract: the path guard runs first, then
//! the edge routing decision, then locale negotiation, then the
//! authentication gate. Auth must see the final rewritten, localized path
//! or it would misclassify App and Admin routes.

use axum::{
    body::Body,
    http::{header, Request},
};

pub mod edge_router;
pub mod locale;
pub mod path_guard;
pub mod require_auth;

/// Reads one cookie from the `Cookie` header.
pub(crate) fn cookie_value(request: &Request<Body>, name: &str) -> Option<String> {
    let header = request.headers().get(header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

pub use edge_router::{edge_router_middleware, EdgeState, ResolvedRoute};
pub use locale::locale_middleware;
pub use path_guard::path_guard_middleware;
pub use require_auth::{require_auth_middleware, AuthGateState};
