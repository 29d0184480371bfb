//! Authentication gate middleware
//!
//! Classifies the final (post-rewrite) request path as public or protected
//! against a fixed pattern table, and blocks protected paths until a
//! verified session is presented. Must run after the routing and locale
//! layers: gating on a pre-rewrite path would misclassify App and Admin
//! routes whose true protected path only exists after rewriting.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;
use crate::i18n::{split_locale, with_locale, DEFAULT_LOCALE};
use crate::middleware::cookie_value;
use crate::routing::engine::is_exempt_path;
use crate::session::SessionVerifier;

/// Name of the cookie carrying the browser session token.
pub const SESSION_COOKIE: &str = "__session";

lazy_static! {
    /// Paths reachable without a session: locale roots, sign-in/sign-up,
    /// and the locale-prefixed marketing and documentation pages. API
    /// paths are public here because they authenticate per-request
    /// downstream.
    static ref PUBLIC_ROUTES: Vec<Regex> = vec![
        Regex::new(r"^/healthz$").unwrap(),
        Regex::new(r"^/(en|fr|ar)/?$").unwrap(),
        Regex::new(r"^/(en|fr|ar)/(sign-in|sign-up)(/.*)?$").unwrap(),
        Regex::new(r"^/(en|fr|ar)/(about|pricing|faq|docs|help|contact|terms|privacy)(/.*)?$")
            .unwrap(),
    ];
}

/// Returns `true` when the path needs no session.
pub fn is_public_route(path: &str) -> bool {
    is_exempt_path(path) || PUBLIC_ROUTES.iter().any(|re| re.is_match(path))
}

/// Shared state for the authentication gate
#[derive(Clone)]
pub struct AuthGateState {
    verifier: SessionVerifier,
    sign_in_path: String,
}

impl AuthGateState {
    pub fn new(verifier: SessionVerifier, sign_in_path: impl Into<String>) -> Self {
        Self {
            verifier,
            sign_in_path: sign_in_path.into(),
        }
    }
}

/// Authentication gate middleware
///
/// Protected paths proceed only with a valid session token, read from the
/// session cookie or a `Bearer` authorization header. Browser requests
/// without one are redirected to the locale-prefixed sign-in page with a
/// `redirect_url` back to the requested path.
pub async fn require_auth_middleware(
    State(gate): State<AuthGateState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();
    if is_public_route(&path) {
        return Ok(next.run(request).await);
    }

    let token = match bearer_token(&request)? {
        Some(token) => Some(token),
        None => cookie_value(&request, SESSION_COOKIE),
    };

    match token {
        Some(token) if gate.verifier.verify(&token).is_ok() => Ok(next.run(request).await),
        _ => {
            tracing::debug!(%path, "unauthenticated request to protected path");
            Ok(sign_in_redirect(&gate.sign_in_path, &path))
        }
    }
}

/// Extracts a Bearer token. An Authorization header with a different
/// scheme is a client error, not a silent fallthrough.
fn bearer_token(request: &Request<Body>) -> Result<Option<String>, AppError> {
    let Some(header) = request.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header encoding".into()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization header must use Bearer scheme".into()))?;
    Ok(Some(token.to_string()))
}

/// Builds the authentication redirect, keeping the requester's locale.
fn sign_in_redirect(sign_in_path: &str, requested: &str) -> Response {
    let (locale, _) = split_locale(requested);
    let locale = locale.unwrap_or(DEFAULT_LOCALE);
    let location = format!(
        "{}?redirect_url={}",
        with_locale(locale, sign_in_path),
        urlencoding::encode(requested)
    );
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use axum::{http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn protected_handler() -> &'static str {
        "Protected content"
    }

    fn create_test_verifier() -> SessionVerifier {
        SessionVerifier::new(SessionConfig {
            secret: "test-secret-key-for-session-signing".to_string(),
            issuer: "https://syndik.test".to_string(),
            sign_in_path: "/sign-in".to_string(),
        })
    }

    fn app(verifier: SessionVerifier) -> Router {
        let gate = AuthGateState::new(verifier, "/sign-in");
        Router::new()
            .fallback(get(protected_handler))
            .layer(axum::middleware::from_fn_with_state(
                gate,
                require_auth_middleware,
            ))
    }

    #[test]
    fn test_public_route_table() {
        assert!(is_public_route("/en"));
        assert!(is_public_route("/fr/"));
        assert!(is_public_route("/ar/sign-in"));
        assert!(is_public_route("/en/sign-up/verify"));
        assert!(is_public_route("/fr/pricing"));
        assert!(is_public_route("/en/docs/getting-started"));
        assert!(is_public_route("/api/webhooks"));
        assert!(is_public_route("/healthz"));
        assert!(is_public_route("/favicon.ico"));

        assert!(!is_public_route("/en/dashboard"));
        assert!(!is_public_route("/en/admin/users"));
        assert!(!is_public_route("/en/settings"));
        assert!(!is_public_route("/en/org-switcher"));
    }

    #[tokio::test]
    async fn test_missing_session_redirects_to_sign_in() {
        let app = app(create_test_verifier());
        let request = Request::builder()
            .uri("/fr/dashboard")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "/fr/sign-in?redirect_url=%2Ffr%2Fdashboard"
        );
    }

    #[tokio::test]
    async fn test_invalid_cookie_redirects() {
        let app = app(create_test_verifier());
        let request = Request::builder()
            .uri("/en/settings")
            .header("Cookie", "__session=not.a.token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_valid_cookie_allows_request() {
        let verifier = create_test_verifier();
        let token = verifier.create_session_token("user-1", 3600).unwrap();
        let app = app(verifier);
        let request = Request::builder()
            .uri("/en/settings")
            .header("Cookie", format!("__session={token}"))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_valid_bearer_token_allows_request() {
        let verifier = create_test_verifier();
        let token = verifier.create_session_token("user-1", 3600).unwrap();
        let app = app(verifier);
        let request = Request::builder()
            .uri("/en/admin/users")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_rejected() {
        let app = app(create_test_verifier());
        let request = Request::builder()
            .uri("/en/settings")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_public_route_needs_no_session() {
        let app = app(create_test_verifier());
        let request = Request::builder()
            .uri("/en/pricing")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
