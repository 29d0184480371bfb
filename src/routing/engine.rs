//! Routing decision engine
//!
//! The per-request orchestrator: given the inbound hostname, path,
//! environment, and a pre-negotiated locale hint, produces exactly one
//! [`RoutingDecision`]. Steps run in a fixed order and the first
//! non-pass-through decision is terminal; nothing is ever rewritten twice.
//! The function is pure and synchronous: no I/O, no shared state, the same
//! inputs always produce the same decision. Malformed hostnames degrade to
//! Main-domain behavior, never to an error.

use axum::http::StatusCode;

use crate::i18n::{split_locale, with_locale, Locale, DEFAULT_LOCALE};
use crate::routing::environment::Environment;
use crate::routing::portal::{parse, Portal};
use crate::routing::url_builder::{build, BaseUrls};

/// Path prefix addressing machine endpoints. Never rewritten.
pub const API_PREFIX: &str = "/api";

/// Path prefix addressing framework-internal assets. Never rewritten.
pub const INTERNAL_PREFIX: &str = "/_next";

/// Path segment owned by the admin portal.
pub const ADMIN_SEGMENT: &str = "admin";

/// Development-only marker segment that stands in for the admin subdomain,
/// since local DNS has no real subdomains.
pub const ADMIN_DEV_SEGMENT: &str = "admin-dev";

/// Path segments that semantically belong to the App portal. On the Main
/// origin these trigger a cross-origin redirect.
pub const APP_SEGMENTS: &[&str] = &["dashboard", "portal", "org-switcher", "org-redirect"];

/// Utility routes reachable without a locale prefix; the engine localizes
/// them itself so they work before the general i18n layer runs.
pub const LOCALIZED_UTILITY_PATHS: &[&str] = &["/org-switcher", "/org-redirect"];

/// The single outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Hand the request to the next layer unchanged.
    PassThrough,
    /// Internally substitute the request path; invisible to the client.
    Rewrite(String),
    /// Send the client to a different origin.
    Redirect {
        location: String,
        status: StatusCode,
    },
}

impl RoutingDecision {
    fn redirect(location: String) -> Self {
        Self::Redirect {
            location,
            status: StatusCode::FOUND,
        }
    }
}

/// First path segment after the leading slash, if any.
fn first_segment(path: &str) -> Option<&str> {
    let seg = path.trim_start_matches('/').split('/').next().unwrap_or("");
    (!seg.is_empty()).then_some(seg)
}

/// Drops the first path segment, keeping the rest rooted: `/a/b` -> `/b`,
/// `/a` -> `/`.
fn strip_first_segment(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    match trimmed.find('/') {
        Some(idx) => &trimmed[idx..],
        None => "/",
    }
}

/// Whether the final path segment carries a file extension.
fn has_file_extension(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|seg| seg.contains('.'))
}

/// Joins a portal-owned segment with the remainder of a path.
fn prefix_segment(segment: &str, rest: &str) -> String {
    if rest == "/" {
        format!("/{segment}")
    } else {
        format!("/{segment}{rest}")
    }
}

/// Host part of an absolute URL, for self-redirect suppression.
fn host_of(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    after_scheme.split(['/', '?']).next().unwrap_or(after_scheme)
}

/// Paths exempt from rewriting and localization: API endpoints (step 1),
/// framework-internal assets and file requests (step 2). The locale and
/// auth layers honor the same exemptions.
pub fn is_exempt_path(path: &str) -> bool {
    path == API_PREFIX
        || path.starts_with("/api/")
        || path.starts_with(INTERNAL_PREFIX)
        || has_file_extension(path)
}

/// Decides how one request is routed.
///
/// `locale_hint` is the locale negotiated from the request's cookie and
/// language header; it is only consulted where a locale segment must be
/// inserted and the path carries none.
pub fn decide(
    hostname: &str,
    path: &str,
    env: Environment,
    locale_hint: Locale,
    bases: &BaseUrls,
) -> RoutingDecision {
    // Steps 1 and 2: API endpoints are addressed by path regardless of
    // portal; internal assets and files are never rewritten.
    if is_exempt_path(path) {
        return RoutingDecision::PassThrough;
    }

    // Step 3: development-only admin marker, with or without a locale.
    if env == Environment::Development {
        let (locale, rest) = split_locale(path);
        if first_segment(rest) == Some(ADMIN_DEV_SEGMENT) {
            let locale = locale.unwrap_or(DEFAULT_LOCALE);
            let tail = strip_first_segment(rest);
            return RoutingDecision::Rewrite(with_locale(
                locale,
                &prefix_segment(ADMIN_SEGMENT, tail),
            ));
        }
    }

    // Step 4: which portal does the hostname address?
    let portal = parse(hostname, env, &bases.root_domain);

    // Step 5: portal enforcement. The Admin and App rewrites apply in every
    // environment (local port/prefix conventions resolve portals too); the
    // cross-origin redirects are skipped in Development, where one local
    // origin serves every portal, and in Preview, where every portal shares
    // a single origin.
    match portal {
        Some(Portal::Admin) => {
            let (locale, rest) = split_locale(path);
            if first_segment(rest) != Some(ADMIN_SEGMENT) {
                let locale = locale.unwrap_or(DEFAULT_LOCALE);
                return RoutingDecision::Rewrite(with_locale(
                    locale,
                    &prefix_segment(ADMIN_SEGMENT, rest),
                ));
            }
        }
        Some(Portal::App) => {
            let (locale, rest) = split_locale(path);
            if rest == "/" {
                // The App origin hides its dashboard segment at the root.
                let locale = locale.unwrap_or(locale_hint);
                return RoutingDecision::Rewrite(with_locale(locale, "/dashboard"));
            }
        }
        Some(Portal::Main) | None
            if env != Environment::Development && env != Environment::Preview =>
        {
            let (locale, rest) = split_locale(path);
            if let Some(seg) = first_segment(rest) {
                if seg == ADMIN_SEGMENT {
                    let locale = locale.unwrap_or(locale_hint);
                    let target = with_locale(locale, strip_first_segment(rest));
                    return cross_origin(hostname, Portal::Admin, &target, env, bases);
                }
                if APP_SEGMENTS.contains(&seg) {
                    let locale = locale.unwrap_or(locale_hint);
                    // Dashboard paths travel in their clean form; the App
                    // origin re-adds the segment internally.
                    let clean = if seg == "dashboard" {
                        strip_first_segment(rest)
                    } else {
                        rest
                    };
                    let target = with_locale(locale, clean);
                    return cross_origin(hostname, Portal::App, &target, env, bases);
                }
            }
        }
        _ => {}
    }

    // Step 7: bare utility routes get a locale before the i18n layer runs.
    if LOCALIZED_UTILITY_PATHS.contains(&path) {
        return RoutingDecision::Rewrite(with_locale(locale_hint, path));
    }

    // Step 8: locale negotiation and the auth gate run downstream.
    RoutingDecision::PassThrough
}

/// Builds a cross-origin redirect, suppressing it when the target origin
/// is the requesting origin (a redirect-to-self can only loop).
fn cross_origin(
    hostname: &str,
    portal: Portal,
    path: &str,
    env: Environment,
    bases: &BaseUrls,
) -> RoutingDecision {
    let location = build(portal, path, env, bases, &[]);
    if host_of(&location).eq_ignore_ascii_case(hostname) {
        return RoutingDecision::PassThrough;
    }
    RoutingDecision::redirect(location)
}
