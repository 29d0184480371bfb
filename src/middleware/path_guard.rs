//! Path traversal guard middleware
//!
//! Rejects requests whose path contains `.` or `..` segments before any
//! routing decision runs. Rewrites prepend portal path prefixes, so a
//! traversal sequence surviving this point could steer a request across
//! portal boundaries.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::error::AppError;

/// Returns `true` if any path segment is `.` or `..`.
fn has_dot_segments(path: &str) -> bool {
    path.split('/').any(|seg| seg == "." || seg == "..")
}

/// Middleware that rejects requests with path traversal sequences.
pub async fn path_guard_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();
    if has_dot_segments(path) {
        return Err(AppError::BadRequest("dot segments are not allowed".into()));
    }
    Ok(next.run(request).await)
}
