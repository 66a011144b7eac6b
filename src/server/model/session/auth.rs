//! Login flag kept in the visitor's session.
//!
//! The flag is the only proof of login the gate knows about. It is set when the provider
//! redirects back with a `code` & `state`, read on every gated request and removed on logout.
//! The timestamp is recorded but never compared against anything, a flag stays valid for as long
//! as the session store keeps the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

/// Session key for the login flag.
pub const SESSION_AUTH_USER_KEY: &str = "frontgate:auth:user";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionAuthUser {
    pub logged_in: bool,
    /// Unix timestamp in seconds of when the flag was set
    pub time: i64,
}

impl SessionAuthUser {
    /// Marks the session as logged in at `now`, replacing any previous flag.
    pub async fn insert(session: &Session, now: DateTime<Utc>) -> Result<(), Error> {
        session
            .insert(
                SESSION_AUTH_USER_KEY,
                SessionAuthUser {
                    logged_in: true,
                    time: now.timestamp(),
                },
            )
            .await?;

        Ok(())
    }

    /// Get the login flag from session, a value of any other shape counts as no flag
    pub async fn get(session: &Session) -> Result<Option<SessionAuthUser>, Error> {
        let value = session.get_value(SESSION_AUTH_USER_KEY).await?;

        Ok(value.and_then(Self::from_value))
    }

    /// Whether the session carries `logged_in == true`
    pub async fn is_logged_in(session: &Session) -> Result<bool, Error> {
        Ok(Self::get(session).await?.is_some_and(|flag| flag.logged_in))
    }

    /// Removes the login flag, returning it if one was present.
    ///
    /// A value of any other shape under the flag's key is removed as well.
    pub async fn remove(session: &Session) -> Result<Option<SessionAuthUser>, Error> {
        let value = session.remove_value(SESSION_AUTH_USER_KEY).await?;

        Ok(value.and_then(Self::from_value))
    }

    fn from_value(value: serde_json::Value) -> Option<SessionAuthUser> {
        match serde_json::from_value(value) {
            Ok(flag) => Some(flag),
            Err(e) => {
                tracing::warn!("Ignoring malformed login flag in session: {}", e);

                None
            }
        }
    }

    /// Time the flag was set, `None` for out of range timestamps
    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}
