use axum::http::{header, HeaderMap};

use crate::server::{
    config::Config,
    error::{auth::AuthError, Error},
};

/// Validates the `Authorization: Bearer` header against the configured admin token.
///
/// # Returns
/// - `Ok(())` - Token matches
/// - `Err(Error::AuthError(AuthError::AdminUnauthorized))` - No token configured, header missing
///   or token mismatch
pub fn require_admin(config: &Config, headers: &HeaderMap) -> Result<(), Error> {
    let Some(expected) = config.admin_token.as_deref() else {
        return Err(AuthError::AdminUnauthorized.into());
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(AuthError::AdminUnauthorized.into()),
    }
}
