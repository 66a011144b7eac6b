use std::{net::SocketAddr, path::PathBuf};

use oauth2::url::Url;

use crate::server::error::config::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SITE_ROOT: &str = "public";
pub const DEFAULT_NATIVE_AUTH_COOKIE_PREFIX: &str = "wordpress_logged_in_";

pub struct Config {
    /// Public base URL of the gated site, used to build callback, return & logout URLs
    pub site_url: Url,
    pub database_url: String,
    pub valkey_url: String,
    pub bind_addr: SocketAddr,
    /// Directory served as the gated site
    pub site_root: PathBuf,
    /// Bearer token for the settings API, the API rejects every request when unset
    pub admin_token: Option<String>,
    /// Cookie name prefix marking a visitor as logged into the site natively
    pub native_auth_cookie_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let site_url = parse_site_url("SITE_URL", &required("SITE_URL")?)?;

        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            site_url,
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_addr,
            site_root: optional("SITE_ROOT")
                .unwrap_or_else(|| DEFAULT_SITE_ROOT.to_string())
                .into(),
            admin_token: optional("ADMIN_TOKEN"),
            native_auth_cookie_prefix: optional("NATIVE_AUTH_COOKIE_PREFIX")
                .unwrap_or_else(|| DEFAULT_NATIVE_AUTH_COOKIE_PREFIX.to_string()),
        })
    }

    /// Site URL joined with `path`, `home_url("")` is the bare site home
    pub fn home_url(&self, path: &str) -> String {
        format!("{}{}", self.site_url.as_str().trim_end_matches('/'), path)
    }

    /// Scheme, host & port of the site, without any base path
    pub fn site_origin(&self) -> String {
        self.site_url.origin().ascii_serialization()
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

pub fn parse_site_url(var: &str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvValue {
        var: var.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme {scheme}"))),
    }
}
