//! Cross-portal URL construction
//!
//! Builds fully-qualified, environment-correct URLs for navigation between
//! portals. Origin selection is a fixed lookup over (environment, portal):
//! loopback host/port conventions in Development, the single deployment
//! origin in Preview, and explicit overrides or synthesized subdomains in
//! Staging and Production. The Development table mirrors the hostname
//! parser's conventions so a built URL parses back to the same portal.

use crate::routing::environment::Environment;
use crate::routing::portal::{Portal, ADMIN_DEV_PORT};

/// Base-origin configuration consumed by the builder: the root domain plus
/// the optional per-portal overrides. Missing overrides are never fatal;
/// an origin is synthesized from the root domain instead.
#[derive(Debug, Clone)]
pub struct BaseUrls {
    /// Apex domain of the product, e.g. `syndik.ma`.
    pub root_domain: String,
    /// Explicit Main origin override.
    pub main: Option<String>,
    /// Explicit App origin override.
    pub app: Option<String>,
    /// Explicit Admin origin override.
    pub admin: Option<String>,
    /// Origin of the current preview deployment, when running on one.
    pub preview: Option<String>,
}

impl BaseUrls {
    /// Configuration with no overrides, deriving everything from the
    /// root domain.
    pub fn for_domain(root_domain: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into(),
            main: None,
            app: None,
            admin: None,
            preview: None,
        }
    }
}

/// Selects the base origin for a portal in an environment.
///
/// Preview deployments have exactly one hostname, so every portal degrades
/// to the single preview origin there; callers must disambiguate portals
/// by path prefix in that environment.
pub fn origin(portal: Portal, env: Environment, bases: &BaseUrls) -> String {
    match env {
        Environment::Development => match portal {
            Portal::Main => "http://localhost:3000".to_string(),
            Portal::App => "http://app.localhost:3000".to_string(),
            Portal::Admin => format!("http://localhost:{ADMIN_DEV_PORT}"),
            Portal::Api => "http://api.localhost:3000".to_string(),
        },
        Environment::Preview => normalize_origin(
            bases
                .preview
                .as_deref()
                .or(bases.main.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("https://{}", bases.root_domain)),
        ),
        Environment::Staging => deployed_origin(portal, bases, &format!("staging.{}", bases.root_domain)),
        Environment::Production => deployed_origin(portal, bases, &bases.root_domain),
    }
}

fn deployed_origin(portal: Portal, bases: &BaseUrls, domain: &str) -> String {
    let override_for = match portal {
        Portal::Main => bases.main.as_deref(),
        Portal::App => bases.app.as_deref(),
        Portal::Admin => bases.admin.as_deref(),
        Portal::Api => None,
    };
    match override_for {
        Some(value) => normalize_origin(value.to_string()),
        None => match portal {
            Portal::Main => format!("https://{domain}"),
            other => format!("https://{}.{domain}", other.as_str()),
        },
    }
}

fn normalize_origin(origin: String) -> String {
    origin.trim_end_matches('/').to_string()
}

/// Builds an absolute URL on a portal's origin.
///
/// The path is normalized to exactly one leading slash; query parameters
/// are appended in caller-supplied order. Total: every syntactically valid
/// input produces a URL.
pub fn build(
    portal: Portal,
    path: &str,
    env: Environment,
    bases: &BaseUrls,
    query: &[(&str, &str)],
) -> String {
    let origin = origin(portal, env, bases);
    let path = format!("/{}", path.trim_start_matches('/'));
    if query.is_empty() {
        return format!("{origin}{path}");
    }
    let mut encoded = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        encoded.append_pair(key, value);
    }
    format!("{origin}{path}?{}", encoded.finish())
}
