//! Locale negotiation middleware
//!
//! Runs after the routing decision, because rewriting can change which
//! path segment is "the locale segment". Guarantees every page request
//! proceeds downstream with a locale-prefixed path and the resolved
//! locale attached to the request; API, internal, and file paths are
//! exempt.

use axum::{
    body::Body,
    http::{header, Request, Uri},
    middleware::Next,
    response::Response,
};

use crate::i18n::{self, split_locale, with_locale, LOCALE_COOKIE};
use crate::middleware::cookie_value;
use crate::routing::engine::is_exempt_path;

/// Negotiates and pins the request locale.
pub async fn locale_middleware(mut request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_exempt_path(&path) || path == "/healthz" {
        return next.run(request).await;
    }

    let locale = match split_locale(&path) {
        (Some(locale), _) => locale,
        (None, _) => {
            let cookie = cookie_value(&request, LOCALE_COOKIE);
            let accept = request
                .headers()
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let locale = i18n::negotiate(&path, cookie.as_deref(), accept.as_deref());
            let localized = with_locale(locale, &path);
            tracing::debug!(from = %path, to = %localized, "localizing request path");
            set_path(&mut request, &localized);
            locale
        }
    };

    request.extensions_mut().insert(locale);
    next.run(request).await
}

fn set_path(request: &mut Request<Body>, new_path: &str) {
    let rewritten = match request.uri().query() {
        Some(query) => format!("{new_path}?{query}"),
        None => new_path.to_string(),
    };
    if let Ok(uri) = rewritten.parse::<Uri>() {
        *request.uri_mut() = uri;
    }
}
