use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, auth::AuthStatusDto},
    server::{
        error::Error,
        model::{app::AppState, session::auth::SessionAuthUser},
        service::gate::LOGOUT_PARAM,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Get the login state of the current visitor
///
/// The returned logout URL is a site URL, following it clears the login flag and signs the
/// visitor out at the provider.
#[utoipa::path(
    get,
    path = "/api/auth/status",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Login state of the current session", body = AuthStatusDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_status(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let flag = SessionAuthUser::get(&session)
        .await?
        .filter(|flag| flag.logged_in);

    Ok(Json(AuthStatusDto {
        logged_in: flag.is_some(),
        logged_in_at: flag.and_then(|flag| flag.logged_in_at()),
        logout_url: state.config.home_url(&format!("/?{}=1", LOGOUT_PARAM)),
    }))
}
