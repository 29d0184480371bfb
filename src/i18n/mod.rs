//! Locale handling for the Syndik portals
//!
//! The portals render in a small fixed set of languages. Every page path
//! carries a leading two-letter locale segment (`/en/...`); this module owns
//! that grammar plus the negotiation precedence used when a request arrives
//! without one: path segment > stored cookie > `Accept-Language` > default.

/// Supported rendering locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// French.
    Fr,
    /// Arabic (right-to-left).
    Ar,
}

/// Horizontal writing direction of a locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value suitable for an HTML `dir` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Locale {
    /// Canonical two-letter path segment for this locale.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Ar => "ar",
        }
    }

    /// Writing direction, for the `dir` attribute of rendered pages.
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::Ar => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    /// Parses a locale value, case-insensitive and tolerant of region tags
    /// (`fr-FR`, `ar_MA`).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }
}

/// Ordered list of supported locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Fr, Locale::Ar];

/// Locale used when no signal expresses a preference.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// Name of the cookie that stores a previously negotiated locale.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Splits a path into its leading locale segment and the remainder.
///
/// The remainder always starts with `/`; a path that is exactly a bare
/// locale (`/en`) yields `(Some(En), "/")`.
pub fn split_locale(path: &str) -> (Option<Locale>, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (first, rest) = match trimmed.find('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, "/"),
    };
    // Only exact two-letter segments count; "/envelope" is not "/en".
    if first.len() == 2 {
        if let Some(locale) = Locale::parse(first) {
            return (Some(locale), rest);
        }
    }
    (None, path)
}

/// Prefixes `rest` with the locale segment, normalizing to a single
/// leading slash. `with_locale(En, "/")` yields `/en`.
pub fn with_locale(locale: Locale, rest: &str) -> String {
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        format!("/{}", locale.as_str())
    } else {
        format!("/{}/{}", locale.as_str(), rest)
    }
}

/// Resolves the locale governing a request.
///
/// Precedence: an explicit locale segment in the path, then the stored
/// locale cookie, then the client's `Accept-Language` header, then
/// [`DEFAULT_LOCALE`]. Total: always returns a value.
pub fn negotiate(path: &str, cookie: Option<&str>, accept_language: Option<&str>) -> Locale {
    if let (Some(locale), _) = split_locale(path) {
        return locale;
    }
    if let Some(locale) = cookie.and_then(Locale::parse) {
        return locale;
    }
    if let Some(locale) = accept_language.and_then(preferred_language) {
        return locale;
    }
    DEFAULT_LOCALE
}

/// Picks the first supported language from an `Accept-Language` header,
/// honoring the client's listed order. Quality weights are ignored; real
/// clients already order entries by preference.
fn preferred_language(header: &str) -> Option<Locale> {
    header
        .split(',')
        .filter_map(|item| item.split(';').next())
        .find_map(Locale::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_locale_tolerant() {
        assert_eq!(Locale::parse("fr"), Some(Locale::Fr));
        assert_eq!(Locale::parse("FR"), Some(Locale::Fr));
        assert_eq!(Locale::parse("ar_MA"), Some(Locale::Ar));
        assert_eq!(Locale::parse("en-US"), Some(Locale::En));
        assert_eq!(Locale::parse("de"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Locale::Ar.direction(), TextDirection::Rtl);
        assert_eq!(Locale::En.direction(), TextDirection::Ltr);
        assert_eq!(Locale::Fr.direction().as_str(), "ltr");
        assert_eq!(Locale::Ar.direction().as_str(), "rtl");
    }

    #[test]
    fn test_split_locale() {
        assert_eq!(split_locale("/en/dashboard"), (Some(Locale::En), "/dashboard"));
        assert_eq!(split_locale("/ar"), (Some(Locale::Ar), "/"));
        assert_eq!(split_locale("/"), (None, "/"));
        assert_eq!(split_locale("/about"), (None, "/about"));
        // A longer segment that merely starts with a locale code is not one.
        assert_eq!(split_locale("/envelope/x"), (None, "/envelope/x"));
        // Unsupported two-letter segments stay part of the path.
        assert_eq!(split_locale("/de/about"), (None, "/de/about"));
    }

    #[test]
    fn test_with_locale() {
        assert_eq!(with_locale(Locale::En, "/"), "/en");
        assert_eq!(with_locale(Locale::Fr, "/dashboard"), "/fr/dashboard");
        assert_eq!(with_locale(Locale::Ar, "settings"), "/ar/settings");
        assert_eq!(with_locale(Locale::En, ""), "/en");
    }

    #[test]
    fn test_negotiate_precedence() {
        // Path wins over everything.
        assert_eq!(negotiate("/fr/about", Some("ar"), Some("en")), Locale::Fr);
        // Cookie wins over header.
        assert_eq!(negotiate("/about", Some("ar"), Some("en")), Locale::Ar);
        // Header wins over default.
        assert_eq!(negotiate("/about", None, Some("fr-FR,en;q=0.8")), Locale::Fr);
        // Default when nothing expresses a preference.
        assert_eq!(negotiate("/about", None, None), DEFAULT_LOCALE);
        // Unsupported signals fall through.
        assert_eq!(negotiate("/about", Some("de"), Some("de-DE,es")), DEFAULT_LOCALE);
    }

    #[test]
    fn test_preferred_language_skips_unsupported() {
        assert_eq!(preferred_language("de-DE,ar;q=0.7,en;q=0.5"), Some(Locale::Ar));
        assert_eq!(preferred_language("zh-CN"), None);
    }

    #[test]
    fn test_supported_locales_are_distinct() {
        for (i, a) in SUPPORTED_LOCALES.iter().enumerate() {
            for b in &SUPPORTED_LOCALES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
