//! Request view the gate makes its decisions on.

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header, HeaderMap, Uri},
};
use tower_sessions::cookie::Cookie;

/// Header set by front-end scripts on asynchronous requests
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Everything the gate needs to know about one request.
///
/// Built once per request from the URI, headers and session, then passed by reference through the
/// decision functions so none of them touch the request or session directly.
#[derive(Clone, Debug, Default)]
pub struct GateRequest {
    /// URI path, e.g. `/blog/post-1`
    pub path: String,
    /// Path plus query string as requested, e.g. `/blog/post-1?page=2`
    pub path_and_query: String,
    /// Decoded query parameters, the last value wins for repeated keys
    pub query: HashMap<String, String>,
    /// Asynchronous or background call made by page scripts
    pub is_background: bool,
    /// Visitor carries the site's native login cookie
    pub native_logged_in: bool,
    /// Visitor's session carries the gate's login flag
    pub session_logged_in: bool,
}

impl GateRequest {
    /// Builds the request view from the URI & headers.
    ///
    /// `session_logged_in` is left false, the caller fills it from the session. A query string
    /// that fails to decode is treated as empty.
    pub fn from_parts(uri: &Uri, headers: &HeaderMap, native_cookie_prefix: &str) -> Self {
        let path = uri.path().to_string();
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.clone());

        let query = Query::<HashMap<String, String>>::try_from_uri(uri)
            .map(|Query(query)| query)
            .unwrap_or_else(|e| {
                tracing::debug!(uri = %uri, "Ignoring malformed query string: {}", e);
                HashMap::new()
            });

        let is_background = path.ends_with("admin-ajax.php")
            || headers
                .get(REQUESTED_WITH_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

        Self {
            native_logged_in: has_native_login_cookie(headers, native_cookie_prefix),
            path,
            path_and_query,
            query,
            is_background,
            session_logged_in: false,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    /// Path with leading & trailing slashes removed, the form excluded paths are matched against
    pub fn trimmed_path(&self) -> &str {
        self.path.trim_matches('/')
    }
}

fn has_native_login_cookie(headers: &HeaderMap, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .any(|c| c.name().starts_with(prefix) && !c.value().is_empty())
}
