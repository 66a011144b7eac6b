use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::{
    model::{api::ErrorDto, settings::GateSettings},
    server::{
        controller::util::admin::require_admin, error::Error, model::app::AppState,
        service::settings::SettingsService,
    },
};

pub static SETTINGS_TAG: &str = "settings";

/// Get the stored gate settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = SETTINGS_TAG,
    responses(
        (status = 200, description = "Stored settings, defaults for unset fields", body = GateSettings),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("admin_token" = [])),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state.config, &headers)?;

    let settings = SettingsService::new(&state.db).settings().await?;

    Ok(Json(settings))
}

/// Replace the gate settings
///
/// Fields are sanitized before storage, the response carries the settings as stored.
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = SETTINGS_TAG,
    request_body = GateSettings,
    responses(
        (status = 200, description = "Settings saved", body = GateSettings),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("admin_token" = [])),
)]
pub async fn put_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<GateSettings>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state.config, &headers)?;

    let settings = SettingsService::new(&state.db).save(input).await?;

    Ok(Json(settings))
}
