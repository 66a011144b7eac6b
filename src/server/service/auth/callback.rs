use chrono::{DateTime, Utc};
use tower_sessions::Session;

use crate::server::{error::Error, model::session::auth::SessionAuthUser, util::sanitize};

/// `state` value meaning "no return address", the visitor is sent to the site home instead
pub const STATE_SENTINEL: &str = "RANDOM_STATE";

/// Where to send the visitor once the callback has been handled.
///
/// Any other `state` is used as the target after removing characters that cannot appear in a
/// `Location` header. A target left empty by that falls back to `home`.
pub fn callback_redirect(state: &str, home: &str) -> String {
    if state == STATE_SENTINEL {
        return home.to_string();
    }

    match sanitize::redirect_location(state) {
        location if location.is_empty() => home.to_string(),
        location => location,
    }
}

/// Marks the session as logged in and returns where to redirect to.
///
/// Nothing about the callback is checked: any `code` & `state` pair the gate routes here is
/// accepted, and handling the same pair twice leaves the session in the same state.
///
/// # Arguments
/// - `session` - Visitor's session
/// - `state` - `state` parameter as returned by the provider
/// - `home` - Site home, used for the sentinel state
/// - `now` - Login time recorded in the flag
///
/// # Returns
/// - `Ok(String)` - Redirect target
/// - `Err(Error::SessionError)` - Session could not be written
pub async fn handle_callback(
    session: &Session,
    state: &str,
    home: &str,
    now: DateTime<Utc>,
) -> Result<String, Error> {
    SessionAuthUser::insert(session, now).await?;

    let redirect = callback_redirect(state, home);

    tracing::info!(redirect = %redirect, "Visitor logged in through identity provider");

    Ok(redirect)
}
