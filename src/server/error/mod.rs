//! Error types for the frontgate server.
//!
//! Domain-specific errors (authentication, configuration) are aggregated into a single [`Error`]
//! alongside external library errors. Every error implements `IntoResponse` so handlers and the
//! gate middleware can return them directly with `?`.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError},
};

/// Main error type for the frontgate server.
///
/// Uses `thiserror`'s `#[from]` so the `?` operator converts library errors automatically. The
/// `IntoResponse` implementation maps domain errors to their own responses and everything else
/// to a generic 500.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (provider not configured, admin credentials).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Provider or site URL could not be built.
    #[error(transparent)]
    UrlParseError(#[from] oauth2::url::ParseError),
    /// Settings record could not be serialized for storage.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    /// Listener could not be bound or the server failed while running.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details never reach the
/// visitor.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
