use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;

use crate::server::{
    error::Error,
    model::{app::AppState, request::GateRequest, session::auth::SessionAuthUser},
    service::{
        auth::{
            callback::handle_callback,
            login::{authorize_url, login_redirect, render_login_page},
            logout::handle_logout,
        },
        gate::{decide, GateAction},
        redirect_guard::guard_redirect,
        settings::SettingsService,
    },
};

/// Login gate wrapped around the site service.
///
/// Settings are loaded for every request. The request view is handed to [`decide`] and the
/// resulting action is carried out here, only pass-through actions reach the site.
///
/// # Responses
/// - Site response - Request bypasses the gate
/// - 307 (Temporary Redirect) - Callback, logout or a visitor who has to log in
/// - 200 (OK) - Login page, or an admin-area redirect to the provider that was suppressed
/// - 500 (Internal Server Error) - Provider not configured, or a database or session error
pub async fn gate(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let config = &state.config;

    let (settings, provider_settings) = SettingsService::new(&state.db).load().await?;
    let provider = settings.resolve_provider(&provider_settings);

    let mut gate_request = GateRequest::from_parts(
        request.uri(),
        request.headers(),
        &config.native_auth_cookie_prefix,
    );
    gate_request.session_logged_in = SessionAuthUser::is_logged_in(&session).await?;

    let action = decide(&gate_request, &settings, &config.site_origin());

    tracing::debug!(path = %gate_request.path, action = ?action, "Gate decision");

    match action {
        GateAction::AdminPassThrough => {
            let mut response = next.run(request).await;

            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            if let Some(location) = location {
                let verdict =
                    guard_redirect(&gate_request, &location, &provider, &provider_settings);

                if verdict.is_blocked() {
                    response.headers_mut().remove(header::LOCATION);
                    *response.status_mut() = StatusCode::OK;
                }
            }

            Ok(response)
        }
        GateAction::PassThrough(_) => Ok(next.run(request).await),
        GateAction::Callback { state: return_to } => {
            let redirect =
                handle_callback(&session, &return_to, &config.home_url(""), Utc::now()).await?;

            Ok(Redirect::temporary(&redirect).into_response())
        }
        GateAction::LoginPage { redirect_to } => {
            let redirect_to = redirect_to.unwrap_or_else(|| config.home_url(""));
            let login_url = authorize_url(config, &provider, &redirect_to)?;

            Ok(Html(render_login_page(&settings, &login_url)).into_response())
        }
        GateAction::Logout => {
            let redirect = handle_logout(&session, config, &provider).await?;

            Ok(Redirect::temporary(&redirect).into_response())
        }
        GateAction::RequireLogin { return_to } => {
            let redirect = login_redirect(config, &settings, &provider, &return_to)?;

            Ok(Redirect::temporary(redirect.as_str()).into_response())
        }
    }
}
