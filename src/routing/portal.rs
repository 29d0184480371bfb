//! Hostname to portal resolution
//!
//! Maps a request's `Host` header onto one of the product portals. The
//! mapping is a pure function of (environment, hostname): an ordered table
//! of matcher rules per environment, evaluated top to bottom, first match
//! wins. No DNS, no I/O, constant time.

use crate::routing::environment::{
    is_loopback, port_of, strip_port, Environment, PREVIEW_SUFFIX,
};

/// A logical product area with its own origin and path conventions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Portal {
    /// Public marketing and documentation site.
    Main,
    /// Authenticated workspace (dashboard).
    App,
    /// Privileged operations console.
    Admin,
    /// Machine endpoints.
    Api,
}

impl Portal {
    /// Canonical subdomain label for this portal.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::App => "app",
            Self::Admin => "admin",
            Self::Api => "api",
        }
    }

    /// Maps a hostname label to a portal, if it names one.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "main" => Some(Self::Main),
            "app" => Some(Self::App),
            "admin" => Some(Self::Admin),
            "api" => Some(Self::Api),
            _ => None,
        }
    }
}

/// Port that serves the admin console in local development. Local setups
/// cannot register DNS subdomains, so the port stands in for `admin.`.
pub const ADMIN_DEV_PORT: u16 = 3001;

/// Normalized view of a hostname, shared by all matcher rules.
struct HostCtx<'a> {
    /// Lowercased hostname without the port.
    host: String,
    port: Option<u16>,
    root_domain: &'a str,
}

impl<'a> HostCtx<'a> {
    fn new(hostname: &str, root_domain: &'a str) -> Self {
        Self {
            host: strip_port(hostname).to_ascii_lowercase(),
            port: port_of(hostname),
            root_domain,
        }
    }

    fn first_label(&self) -> &str {
        self.host.split('.').next().unwrap_or("")
    }
}

type HostRule = fn(&HostCtx<'_>) -> Option<Portal>;

/// Rules for loopback development hosts, in evaluation order.
const DEVELOPMENT_RULES: &[HostRule] = &[
    admin_port_rule,
    portal_label_rule_loopback,
    bare_loopback_rule,
    loopback_default_rule,
];

/// Rules for every deployed environment, in evaluation order.
const DEPLOYED_RULES: &[HostRule] = &[
    preview_rule,
    root_domain_rule,
    portal_subdomain_rule,
];

/// The reserved admin port maps to Admin even without a subdomain label.
fn admin_port_rule(ctx: &HostCtx<'_>) -> Option<Portal> {
    (ctx.port == Some(ADMIN_DEV_PORT)).then_some(Portal::Admin)
}

/// `app.localhost`, `admin.localhost`, `api.localhost` style hosts map to
/// the portal their first label names.
fn portal_label_rule_loopback(ctx: &HostCtx<'_>) -> Option<Portal> {
    if ctx.host.contains('.') {
        Portal::from_label(ctx.first_label())
    } else {
        None
    }
}

/// Bare loopback with no prefix and no special port is the Main site.
fn bare_loopback_rule(ctx: &HostCtx<'_>) -> Option<Portal> {
    (!ctx.host.contains('.') || ctx.host == "127.0.0.1" || ctx.host == "[::1]")
        .then_some(Portal::Main)
}

/// Any other loopback shape is the App portal, the most common local
/// workflow.
fn loopback_default_rule(_ctx: &HostCtx<'_>) -> Option<Portal> {
    Some(Portal::App)
}

/// Platform preview deployments get exactly one hostname; subdomains do
/// not exist there, so every preview host is Main and portal separation
/// happens by path prefix downstream.
fn preview_rule(ctx: &HostCtx<'_>) -> Option<Portal> {
    ctx.host.ends_with(PREVIEW_SUFFIX).then_some(Portal::Main)
}

/// The bare production domain and the bare staging domain are Main.
fn root_domain_rule(ctx: &HostCtx<'_>) -> Option<Portal> {
    let staging = format!("staging.{}", ctx.root_domain);
    (ctx.host == ctx.root_domain || ctx.host == staging).then_some(Portal::Main)
}

/// `{portal}.{domain}` and `{portal}.staging.{domain}` map to the portal
/// the subdomain label names.
fn portal_subdomain_rule(ctx: &HostCtx<'_>) -> Option<Portal> {
    let prod_suffix = format!(".{}", ctx.root_domain);
    let staging_suffix = format!(".staging.{}", ctx.root_domain);
    let label = ctx
        .host
        .strip_suffix(&staging_suffix)
        .or_else(|| ctx.host.strip_suffix(&prod_suffix))?;
    if label.contains('.') {
        // Deeper nesting is not a recognized shape.
        return None;
    }
    Portal::from_label(label)
}

/// Resolves the portal a hostname addresses, or `None` when the hostname
/// matches no known shape. Callers must treat `None` the same as
/// [`Portal::Main`].
pub fn parse(hostname: &str, env: Environment, root_domain: &str) -> Option<Portal> {
    let ctx = HostCtx::new(hostname, root_domain);
    let rules: &[HostRule] = if env == Environment::Development && is_loopback(&ctx.host) {
        DEVELOPMENT_RULES
    } else {
        DEPLOYED_RULES
    };
    rules.iter().find_map(|rule| rule(&ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const ROOT: &str = "syndik.ma";

    #[rstest]
    #[case("localhost:3000", Some(Portal::Main))]
    #[case("localhost", Some(Portal::Main))]
    #[case("127.0.0.1:3000", Some(Portal::Main))]
    #[case("[::1]:3000", Some(Portal::Main))]
    #[case("localhost:3001", Some(Portal::Admin))]
    #[case("admin.localhost:3000", Some(Portal::Admin))]
    #[case("app.localhost:3000", Some(Portal::App))]
    #[case("api.localhost:3000", Some(Portal::Api))]
    #[case("tenant1.localhost:3000", Some(Portal::App))]
    fn test_development_shapes(#[case] host: &str, #[case] expected: Option<Portal>) {
        assert_eq!(parse(host, Environment::Development, ROOT), expected);
    }

    #[rstest]
    #[case("syndik.ma", Some(Portal::Main))]
    #[case("app.syndik.ma", Some(Portal::App))]
    #[case("admin.syndik.ma", Some(Portal::Admin))]
    #[case("api.syndik.ma", Some(Portal::Api))]
    #[case("blog.syndik.ma", None)]
    #[case("deep.app.syndik.ma", None)]
    fn test_production_shapes(#[case] host: &str, #[case] expected: Option<Portal>) {
        assert_eq!(parse(host, Environment::Production, ROOT), expected);
    }

    #[rstest]
    #[case("staging.syndik.ma", Some(Portal::Main))]
    #[case("app.staging.syndik.ma", Some(Portal::App))]
    #[case("admin.staging.syndik.ma", Some(Portal::Admin))]
    #[case("qa.staging.syndik.ma", None)]
    fn test_staging_shapes(#[case] host: &str, #[case] expected: Option<Portal>) {
        assert_eq!(parse(host, Environment::Staging, ROOT), expected);
    }

    #[test]
    fn test_preview_always_main() {
        // The platform issues one hostname per deployment; any label before
        // the suffix is irrelevant.
        for host in ["my-branch.vercel.app", "admin-preview-42.vercel.app"] {
            assert_eq!(parse(host, Environment::Preview, ROOT), Some(Portal::Main));
        }
    }

    #[test]
    fn test_unrecognized_hostname_is_none() {
        assert_eq!(parse("example.com", Environment::Production, ROOT), None);
        assert_eq!(parse("", Environment::Production, ROOT), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            parse("App.Syndik.MA", Environment::Production, "syndik.ma"),
            Some(Portal::App)
        );
    }

    #[test]
    fn test_admin_port_wins_over_label() {
        // Port fallback is the first development rule.
        assert_eq!(
            parse("app.localhost:3001", Environment::Development, ROOT),
            Some(Portal::Admin)
        );
    }
}
