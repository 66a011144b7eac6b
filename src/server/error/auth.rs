use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Auth0 is not properly configured. Please check the plugin settings.")]
    ProviderNotConfigured,
    #[error("Missing or invalid admin credentials")]
    AdminUnauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            // Halts the request the same way the login page does, with a plain fatal message
            Self::ProviderNotConfigured => {
                tracing::error!("{}", self);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!("<p>{}</p>", self)),
                )
                    .into_response()
            }
            Self::AdminUnauthorized => {
                tracing::debug!("{}", self);

                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Unauthorized".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
