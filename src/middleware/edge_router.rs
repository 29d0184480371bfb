//! Edge routing middleware
//!
//! The outermost decision layer: reads the `Host` header and request path,
//! asks the routing engine for a decision, and applies it. Rewrites mutate
//! the request URI invisibly; redirects terminate the request with a
//! `Location` response. All tracing lives here so the engine itself stays
//! a pure function.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::i18n::{self, LOCALE_COOKIE};
use crate::middleware::cookie_value;
use crate::routing::engine::{decide, RoutingDecision};
use crate::routing::environment::Environment;
use crate::routing::portal::{parse, Portal};
use crate::routing::url_builder::BaseUrls;

/// Shared state for the edge routing middleware
#[derive(Clone)]
pub struct EdgeState {
    pub environment: Environment,
    pub bases: BaseUrls,
}

impl EdgeState {
    pub fn new(environment: Environment, bases: BaseUrls) -> Self {
        Self { environment, bases }
    }
}

/// Routing facts attached to the request for downstream handlers.
#[derive(Debug, Copy, Clone)]
pub struct ResolvedRoute {
    pub portal: Option<Portal>,
    pub environment: Environment,
}

/// Applies the routing engine's decision to one request.
pub async fn edge_router_middleware(
    State(state): State<EdgeState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let hostname = request_host(&request);
    let path = request.uri().path().to_string();
    let cookie_locale = cookie_value(&request, LOCALE_COOKIE);
    let accept_language = header_str(&request, header::ACCEPT_LANGUAGE.as_str());
    let locale_hint = i18n::negotiate(&path, cookie_locale.as_deref(), accept_language.as_deref());

    let portal = parse(&hostname, state.environment, &state.bases.root_domain);
    request.extensions_mut().insert(ResolvedRoute {
        portal,
        environment: state.environment,
    });

    match decide(&hostname, &path, state.environment, locale_hint, &state.bases) {
        RoutingDecision::PassThrough => next.run(request).await,
        RoutingDecision::Rewrite(new_path) => {
            tracing::debug!(%hostname, from = %path, to = %new_path, "rewriting request path");
            rewrite_uri(&mut request, &new_path);
            next.run(request).await
        }
        RoutingDecision::Redirect { location, status } => {
            tracing::debug!(%hostname, %path, %location, "cross-origin redirect");
            (status, [(header::LOCATION, location)]).into_response()
        }
    }
}

/// Hostname the client addressed, from the `Host` header or the URI
/// authority. Empty when neither is present; the engine treats that as an
/// unrecognized shape.
fn request_host(request: &Request<Body>) -> String {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
        .unwrap_or_default()
}

fn header_str(request: &Request<Body>, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Replaces the request path, carrying the original query along.
fn rewrite_uri(request: &mut Request<Body>, new_path: &str) {
    let rewritten = match request.uri().query() {
        Some(query) => format!("{new_path}?{query}"),
        None => new_path.to_string(),
    };
    match rewritten.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(err) => {
            // Unparseable rewrite targets leave the request untouched;
            // the engine only emits paths it built itself.
            tracing::warn!(%rewritten, %err, "dropping unparseable rewrite");
        }
    }
}
