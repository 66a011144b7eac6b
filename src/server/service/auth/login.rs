use oauth2::{basic::BasicClient, url::Url, AuthUrl, ClientId, CsrfToken, RedirectUrl, Scope};

use crate::{
    model::settings::{GateSettings, ResolvedProvider},
    server::{
        config::Config,
        error::{auth::AuthError, Error},
        service::gate::{CALLBACK_PARAM, LOGIN_PARAM, REDIRECT_TO_PARAM},
        util::html,
    },
};

/// Scopes requested from the provider
pub const LOGIN_SCOPES: [&str; 3] = ["openid", "profile", "email"];

/// Placeholder in the custom login template replaced by the provider login URL
pub const LOGIN_URL_PLACEHOLDER: &str = "{{login_url}}";

/// Site URL the provider redirects back to after login
pub fn callback_url(config: &Config) -> Result<Url, Error> {
    Ok(Url::parse_with_params(
        &config.home_url("/"),
        &[(CALLBACK_PARAM, "1")],
    )?)
}

/// Site URL of the intermediate login page, remembering where the visitor was headed
pub fn login_page_url(config: &Config, return_to: &str) -> Result<Url, Error> {
    Ok(Url::parse_with_params(
        &config.home_url("/"),
        &[(LOGIN_PARAM, "1"), (REDIRECT_TO_PARAM, return_to)],
    )?)
}

/// Builds the provider's authorize URL.
///
/// The `state` parameter carries `redirect_to` as is. It is a return address, not a CSRF token.
///
/// # Returns
/// - `Ok(Url)` - `https://{domain}/authorize?...` with client ID, callback URL, scopes & state
/// - `Err(Error::AuthError(AuthError::ProviderNotConfigured))` - Client ID or domain missing
/// - `Err(Error::UrlParseError)` - Domain does not form a valid URL
pub fn authorize_url(
    config: &Config,
    provider: &ResolvedProvider,
    redirect_to: &str,
) -> Result<Url, Error> {
    if !provider.is_configured() {
        return Err(AuthError::ProviderNotConfigured.into());
    }

    let client = BasicClient::new(ClientId::new(provider.client_id.clone()))
        .set_auth_uri(AuthUrl::new(format!("https://{}/authorize", provider.domain))?)
        .set_redirect_uri(RedirectUrl::from_url(callback_url(config)?));

    let state = redirect_to.to_string();
    let (url, _) = client
        .authorize_url(move || CsrfToken::new(state))
        .add_scopes(LOGIN_SCOPES.map(|s| Scope::new(s.to_string())))
        .url();

    Ok(url)
}

/// Where a visitor who has to log in gets sent.
///
/// Straight to the provider when `auto_redirect` is on, otherwise to the intermediate login page.
pub fn login_redirect(
    config: &Config,
    settings: &GateSettings,
    provider: &ResolvedProvider,
    return_to: &str,
) -> Result<Url, Error> {
    if settings.auto_redirect.is_on() {
        authorize_url(config, provider, return_to)
    } else {
        login_page_url(config, return_to)
    }
}

/// Renders the intermediate login page.
///
/// Uses the custom template when one is configured, substituting every `{{login_url}}`,
/// otherwise a default page with a single login link.
pub fn render_login_page(settings: &GateSettings, login_url: &Url) -> String {
    let login_url = html::escape(login_url.as_str());

    if !settings.custom_login_html.is_empty() {
        return settings
            .custom_login_html
            .replace(LOGIN_URL_PLACEHOLDER, &login_url);
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Login Required</title></head>
<body>
<div style="text-align:center; padding:50px;">
<h2>Login Required</h2>
<p>Please login to access this content.</p>
<a href="{login_url}" style="display:inline-block; background:rgb(92, 45, 131); color:white; padding:10px 20px; text-decoration:none; border-radius:4px;">Login</a>
</div>
</body>
</html>
"#
    )
}
