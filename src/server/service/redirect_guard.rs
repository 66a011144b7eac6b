//! Filters outbound redirects in the admin area.
//!
//! While a visitor is in the admin or login area no redirect may send them to the identity
//! provider. Password resets and the gate's own settings page are exempt.

use crate::{
    model::settings::{ProviderSettings, ResolvedProvider},
    server::model::request::GateRequest,
};

/// Substrings marking a redirect target as part of the provider login flow
pub const BLOCKED_REDIRECT_MARKERS: [&str; 5] =
    ["auth0.com", ".auth0.com", "auth0_login", "?auth0", "&auth0"];

/// `page` values of the gate's own settings screen
pub const SETTINGS_PAGES: [&str; 2] = ["simple-auth0-settings", "frontgate-settings"];

/// `action` values used by the site's password reset flow
pub const PASSWORD_RESET_ACTIONS: [&str; 4] = ["lostpassword", "retrievepassword", "resetpass", "rp"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectVerdict {
    Allow,
    /// Allowed because the request is part of a password reset
    AllowPasswordReset,
    Block,
}

impl RedirectVerdict {
    pub fn is_blocked(self) -> bool {
        self == RedirectVerdict::Block
    }
}

fn is_plugin_management(request: &GateRequest) -> bool {
    request.path.contains("plugins.php")
}

fn is_settings_page(request: &GateRequest) -> bool {
    request.param("page").is_some_and(|page| {
        SETTINGS_PAGES.contains(&page) || page.contains("auth0") || page.contains("wpa0")
    })
}

pub fn is_password_reset(request: &GateRequest) -> bool {
    request
        .param("action")
        .is_some_and(|action| PASSWORD_RESET_ACTIONS.contains(&action))
        || request.has_param("checkemail")
}

/// Provider domains blocked alongside the fixed markers.
///
/// The custom domain is included whether or not the gate is set to use it.
fn provider_domains<'a>(
    provider: &'a ResolvedProvider,
    provider_settings: &'a ProviderSettings,
) -> impl Iterator<Item = &'a str> {
    [
        Some(provider.domain.as_str()),
        provider_settings.domain.as_deref(),
        provider_settings.custom_domain.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|domain| !domain.is_empty())
}

/// Decides whether an admin-area redirect to `location` may go ahead.
///
/// # Arguments
/// - `request` - The admin-area request producing the redirect
/// - `location` - Redirect target
/// - `provider` - Resolved provider
/// - `provider_settings` - Provider plugin's record, its domain & custom domain are blocked too
pub fn guard_redirect(
    request: &GateRequest,
    location: &str,
    provider: &ResolvedProvider,
    provider_settings: &ProviderSettings,
) -> RedirectVerdict {
    if is_plugin_management(request) || is_settings_page(request) {
        return RedirectVerdict::Allow;
    }

    if is_password_reset(request) {
        tracing::info!(location = %location, "Allowed redirect during password reset");

        return RedirectVerdict::AllowPasswordReset;
    }

    let blocked = BLOCKED_REDIRECT_MARKERS
        .iter()
        .any(|marker| location.contains(marker))
        || provider_domains(provider, provider_settings).any(|domain| location.contains(domain));

    if blocked {
        tracing::info!(location = %location, "Blocked redirect to identity provider");

        return RedirectVerdict::Block;
    }

    RedirectVerdict::Allow
}
