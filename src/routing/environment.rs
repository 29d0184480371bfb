//! Deployment environment resolution
//!
//! Every routing rule is parametrized by the deployment environment, so it
//! must be pinned down exactly once per process. Resolution precedence,
//! first match wins: explicit `SYNDIK_ENV` override, the platform's
//! deployment-stage variable (`VERCEL_ENV`), a hostname heuristic, and
//! finally Development. The function is total; there is no "unknown"
//! environment.

/// Deployment context of the running process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Local development on a loopback host.
    Development,
    /// Ephemeral platform deployment (one hostname, no real subdomains).
    Preview,
    /// Staging under `staging.{domain}`.
    Staging,
    /// The live product.
    Production,
}

impl Environment {
    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Preview => "preview",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Parses an environment name, accepting the common short forms the
    /// platform and operators use.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Some(Self::Development),
            "preview" => Some(Self::Preview),
            "staging" | "stage" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Hostname suffix the hosting platform assigns to preview deployments.
pub const PREVIEW_SUFFIX: &str = ".vercel.app";

/// Loopback host names and prefixes used in local development.
const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]"];

/// Returns `true` for loopback hosts, with or without a port, including
/// `*.localhost` names.
pub fn is_loopback(hostname: &str) -> bool {
    let host = strip_port(hostname);
    LOOPBACK_HOSTS.contains(&host) || host.ends_with(".localhost")
}

/// Removes a trailing `:port`, leaving IPv6 bracket notation intact.
pub fn strip_port(hostname: &str) -> &str {
    if let Some(end) = hostname.rfind(']') {
        // "[::1]:3000" -> "[::1]"
        return &hostname[..=end];
    }
    match hostname.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => hostname,
    }
}

/// Extracts the port from a hostname, if present.
pub fn port_of(hostname: &str) -> Option<u16> {
    let after_bracket = match hostname.rfind(']') {
        Some(end) => &hostname[end + 1..],
        None => hostname,
    };
    let (_, port) = after_bracket.rsplit_once(':')?;
    port.parse().ok()
}

/// Resolves the deployment environment.
///
/// Precedence: `explicit` override, `platform_stage` variable, hostname
/// heuristic against `root_domain`, then Development. Total: always
/// returns a value.
pub fn resolve(
    explicit: Option<&str>,
    platform_stage: Option<&str>,
    hostname: Option<&str>,
    root_domain: &str,
) -> Environment {
    if let Some(env) = explicit.and_then(Environment::parse) {
        return env;
    }
    if let Some(env) = platform_stage.and_then(Environment::parse) {
        return env;
    }
    if let Some(env) = hostname.and_then(|h| from_hostname(h, root_domain)) {
        return env;
    }
    Environment::Development
}

/// Classifies a hostname into an environment, when its shape is
/// recognizable. Evaluated in order: staging prefix, the production
/// domain, the platform preview suffix, loopback.
pub fn from_hostname(hostname: &str, root_domain: &str) -> Option<Environment> {
    let host = strip_port(hostname).to_ascii_lowercase();
    let staging_host = format!("staging.{root_domain}");
    if host == staging_host || host.ends_with(&format!(".{staging_host}")) {
        return Some(Environment::Staging);
    }
    if host == root_domain || host.ends_with(&format!(".{root_domain}")) {
        return Some(Environment::Production);
    }
    if host.ends_with(PREVIEW_SUFFIX) {
        return Some(Environment::Preview);
    }
    if is_loopback(&host) {
        return Some(Environment::Development);
    }
    None
}
