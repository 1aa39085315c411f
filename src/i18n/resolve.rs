//! Locale detection and resolution for incoming requests.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

/// Query parameters consulted, in priority order.
pub const QUERY_PARAMS: [&str; 2] = ["lang", "language"];

/// Cookies consulted, in priority order.
pub const COOKIE_NAMES: [&str; 2] = ["x-user-locale", "x-client-language"];

/// Headers consulted, in priority order, before `accept-language`.
pub const HEADER_NAMES: [&str; 2] = ["x-user-locale", "x-client-language"];

/// Locale-bearing values taken from one request.
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSignals {
    query: HashMap<String, String>,
    cookies: HashMap<String, String>,
    headers: HashMap<String, String>,
}

impl LocaleSignals {
    /// Create an empty set of signals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Add a cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Collect signals from an HTTP request's URI and headers.
    ///
    /// Only the first occurrence of a repeated query parameter or cookie is
    /// kept. Cookie values are percent-decoded, and kept raw when they do not
    /// decode to UTF-8. Header values that are not valid UTF-8 are ignored.
    pub fn from_http<B>(request: &http::Request<B>) -> Self {
        let mut signals = Self::new();

        if let Some(query) = request.uri().query() {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                signals.query.entry(name.into_owned()).or_insert_with(|| value.into_owned());
            }
        }

        for cookie_header in request.headers().get_all(http::header::COOKIE) {
            let Ok(raw) = cookie_header.to_str() else { continue };
            for pair in raw.split(';') {
                if let Some((name, value)) = pair.split_once('=') {
                    signals
                        .cookies
                        .entry(name.trim().to_string())
                        .or_insert_with(|| decode_cookie_value(value.trim()));
                }
            }
        }

        for (name, value) in request.headers() {
            if let Ok(value) = value.to_str() {
                signals.headers.entry(name.as_str().to_string()).or_insert_with(|| value.to_string());
            }
        }

        signals
    }

    /// Get a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Get a cookie.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Get a header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// The first non-empty locale candidate, if any.
    ///
    /// Checks in order:
    /// 1. query `lang`, then `language`
    /// 2. cookie `x-user-locale`, then `x-client-language`
    /// 3. header `x-user-locale`, then `x-client-language`
    /// 4. header `accept-language`, up to the first comma
    pub fn candidate(&self) -> Option<&str> {
        QUERY_PARAMS
            .iter()
            .map(|name| self.query(name))
            .chain(COOKIE_NAMES.iter().map(|name| self.cookie(name)))
            .chain(HEADER_NAMES.iter().map(|name| self.header(name)))
            .chain(std::iter::once(
                self.header("accept-language").and_then(|value| value.split(',').next()),
            ))
            .flatten()
            .find(|value| !value.is_empty())
    }
}

fn decode_cookie_value(value: &str) -> String {
    let value = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value);
    percent_encoding::percent_decode_str(value)
        .decode_utf8()
        .map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
}

/// The set of locales a service is willing to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptList {
    /// `*`: every candidate is accepted as-is.
    Any,
    /// Only exact members are accepted.
    Only(HashSet<String>),
}

impl AcceptList {
    /// Parse a comma-separated accept list, or `*`.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw == "*" {
            return Ok(Self::Any);
        }

        let locales: HashSet<String> = raw.split(',').map(str::to_string).collect();
        if raw.trim().is_empty() || locales.iter().all(|locale| locale.trim().is_empty()) {
            return Err(Error::config(format!("accept_language must be '*' or a comma-separated list, got {raw:?}")));
        }
        Ok(Self::Only(locales))
    }

    /// Whether a candidate is allowed. Matching is exact.
    pub fn accepts(&self, locale: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(locales) => locales.contains(locale),
        }
    }
}

/// Resolve the effective locale for a request.
///
/// Returns `default_locale` when no signal is present or when the candidate
/// is rejected by the accept list.
pub fn resolve_locale(signals: &LocaleSignals, accept: &AcceptList, default_locale: &str) -> String {
    let candidate = signals.candidate().unwrap_or(default_locale);
    if accept.accepts(candidate) {
        candidate.to_string()
    } else {
        tracing::debug!(candidate, default_locale, "Locale rejected by accept list");
        default_locale.to_string()
    }
}
