use serde::{Deserialize, Serialize};

/// A yes/no switch, stored as `"yes"` or `"no"` in the settings record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Yes,
    No,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::Yes
    }
}

/// Gate settings record stored under the `frontgate_settings` option
///
/// Missing fields fall back to their defaults when a stored record is read, so records written
/// by older versions keep working.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct GateSettings {
    /// Inherit client ID & domain from the provider plugin's record when it has them
    pub use_auth0_settings: Toggle,
    /// Identity provider client ID
    pub client_id: String,
    /// Identity provider domain, host name only
    pub domain: String,
    /// Skip the gate for visitors already logged into the site natively
    pub bypass_for_logged_in: Toggle,
    /// Newline-delimited list of paths exempt from the gate, `*` acts as a wildcard
    pub excluded_paths: String,
    /// Template for the intermediate login page, `{{login_url}}` is substituted
    pub custom_login_html: String,
    /// Redirect straight to the provider instead of showing the intermediate login page
    pub auto_redirect: Toggle,
    /// Prefer the provider plugin's custom domain over its regular domain
    pub use_custom_domain: Toggle,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            use_auth0_settings: Toggle::Yes,
            client_id: String::new(),
            domain: String::new(),
            bypass_for_logged_in: Toggle::Yes,
            excluded_paths: String::new(),
            custom_login_html: String::new(),
            auto_redirect: Toggle::Yes,
            use_custom_domain: Toggle::No,
        }
    }
}

/// Provider plugin's settings record stored under the `wp_auth0_settings` option
///
/// This record is owned by a separate plugin, the gate only ever reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct ProviderSettings {
    pub client_id: Option<String>,
    pub domain: Option<String>,
    pub custom_domain: Option<String>,
}

/// Client ID and domain the gate talks to after applying inheritance rules
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub client_id: String,
    pub domain: String,
}

impl ResolvedProvider {
    /// Both the client ID and domain are known
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.domain.is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl GateSettings {
    /// Resolves the client ID & domain to use against the provider plugin's record.
    ///
    /// A custom domain wins when `use_custom_domain` is on, then the provider plugin's values
    /// when `use_auth0_settings` is on, then the gate's own values.
    pub fn resolve_provider(&self, provider: &ProviderSettings) -> ResolvedProvider {
        let inherit = self.use_auth0_settings.is_on();

        let client_id = non_empty(&provider.client_id)
            .filter(|_| inherit)
            .unwrap_or(&self.client_id);

        let domain = non_empty(&provider.custom_domain)
            .filter(|_| self.use_custom_domain.is_on())
            .or_else(|| non_empty(&provider.domain).filter(|_| inherit))
            .unwrap_or(&self.domain);

        ResolvedProvider {
            client_id: client_id.to_string(),
            domain: domain.to_string(),
        }
    }

    /// Excluded path entries in configured order, trimmed with blank lines dropped
    pub fn excluded_path_patterns(&self) -> Vec<&str> {
        self.excluded_paths
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}
