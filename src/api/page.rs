//! Placeholder downstream page handler
//!
//! Page rendering lives in the portal frontends; the edge service
//! terminates routed requests here, reporting the facts the middleware
//! chain resolved. Useful for integration tests and for verifying a
//! deployment's routing configuration.

use axum::{body::Body, http::Request, response::IntoResponse, Json};
use serde::Serialize;

use crate::i18n::Locale;
use crate::middleware::ResolvedRoute;

#[derive(Serialize)]
pub struct ResolvedPage {
    pub portal: Option<&'static str>,
    pub environment: Option<&'static str>,
    pub locale: Option<&'static str>,
    pub dir: Option<&'static str>,
    pub path: String,
}

/// Reports the routing facts attached to the request.
pub async fn resolved_page(request: Request<Body>) -> impl IntoResponse {
    let route = request.extensions().get::<ResolvedRoute>().copied();
    let locale = request.extensions().get::<Locale>().copied();
    Json(ResolvedPage {
        portal: route.and_then(|r| r.portal).map(|p| p.as_str()),
        environment: route.map(|r| r.environment.as_str()),
        locale: locale.map(|l| l.as_str()),
        dir: locale.map(|l| l.direction().as_str()),
        path: request.uri().path().to_string(),
    })
}
