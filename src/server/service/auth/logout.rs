use oauth2::url::Url;
use tower_sessions::Session;

use crate::{
    model::settings::ResolvedProvider,
    server::{config::Config, error::Error, model::session::auth::SessionAuthUser},
};

/// Provider logout URL returning the visitor to the site home, `None` if the provider is not
/// configured.
pub fn logout_url(config: &Config, provider: &ResolvedProvider) -> Result<Option<Url>, Error> {
    if !provider.is_configured() {
        return Ok(None);
    }

    let url = Url::parse_with_params(
        &format!("https://{}/v2/logout", provider.domain),
        &[
            ("client_id", provider.client_id.as_str()),
            ("returnTo", config.home_url("/").as_str()),
        ],
    )?;

    Ok(Some(url))
}

/// Clears the login flag and returns where to redirect to.
///
/// # Returns
/// - `Ok(String)` - Provider logout URL, or the site home when the provider is not configured
/// - `Err(Error::SessionError)` - Session could not be written
/// - `Err(Error::UrlParseError)` - Domain does not form a valid URL
pub async fn handle_logout(
    session: &Session,
    config: &Config,
    provider: &ResolvedProvider,
) -> Result<String, Error> {
    if SessionAuthUser::remove(session).await?.is_some() {
        tracing::info!("Visitor logged out");
    }

    Ok(match logout_url(config, provider)? {
        Some(url) => url.to_string(),
        None => config.home_url(""),
    })
}
