//! Decides whether a request may skip the login gate.
//!
//! Rules are checked in a fixed order and the first one that holds wins. The order only matters
//! for which [`BypassReason`] gets reported, the outcome is the same either way.

use glob::Pattern;

use crate::{model::settings::GateSettings, server::model::request::GateRequest};

/// Path fragments of the site's own admin & login area
pub const ADMIN_PATH_MARKERS: [&str; 2] = ["/wp-admin", "/wp-login"];

/// Query parameters that mark a request as part of the provider login flow
pub const LOGIN_QUERY_MARKERS: [&str; 4] = ["code", "callback", "auth0_login", "auth0"];

/// Slug of the site's own login page
pub const LOGIN_PAGE_PATH: &str = "login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BypassReason {
    /// Admin or login URL, or a request belonging to the provider login flow
    AdminOrLogin,
    /// Asynchronous call made by page scripts
    Background,
    /// Visitor is logged into the site natively and the settings allow that to count
    NativeLogin,
    /// Session already carries the login flag
    Session,
    /// Path is on the excluded-path list
    ExcludedPath,
}

/// Path belongs to the site's admin or login area
pub fn is_admin_path(path: &str) -> bool {
    ADMIN_PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

/// Returns why the request may skip the gate, or `None` when the gate has to act.
pub fn should_bypass(request: &GateRequest, settings: &GateSettings) -> Option<BypassReason> {
    if is_admin_path(&request.path)
        || LOGIN_QUERY_MARKERS.iter().any(|m| request.has_param(m))
        || request.trimmed_path() == LOGIN_PAGE_PATH
    {
        return Some(BypassReason::AdminOrLogin);
    }

    if request.is_background {
        return Some(BypassReason::Background);
    }

    if settings.bypass_for_logged_in.is_on() && request.native_logged_in {
        return Some(BypassReason::NativeLogin);
    }

    if request.session_logged_in {
        return Some(BypassReason::Session);
    }

    if matches_excluded_path(request.trimmed_path(), &settings.excluded_path_patterns()) {
        return Some(BypassReason::ExcludedPath);
    }

    None
}

/// Whether `path` matches one of `patterns`.
///
/// An entry matches on exact equality, entries containing `*` additionally match as globs where
/// `*` may cross `/`. Entries that are not valid globs never match as globs.
pub fn matches_excluded_path(path: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| {
        if *pattern == path {
            return true;
        }

        if !pattern.contains('*') {
            return false;
        }

        match Pattern::new(pattern) {
            Ok(glob) => glob.matches(path),
            Err(e) => {
                tracing::debug!(pattern = %pattern, "Skipping invalid excluded path: {}", e);
                false
            }
        }
    })
}
