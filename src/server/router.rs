//! HTTP routing and OpenAPI documentation configuration.
//!
//! The `/api` routes are registered with their OpenAPI specifications and Swagger UI is served at
//! `/api/docs`. Every other path falls through to the site service wrapped by the gate.

use axum::{middleware, Router};
use tower_http::services::ServeDir;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

struct AdminTokenAddon;

impl Modify for AdminTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "admin_token",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Builds the application's HTTP router serving the site directory behind the gate.
///
/// # Registered Endpoints
/// - `GET /api/auth/status` - Login state of the current visitor
/// - `GET /api/settings` - Stored gate settings (admin)
/// - `PUT /api/settings` - Replace gate settings (admin)
/// - Anything else - The `SITE_ROOT` directory behind the gate
///
/// The session layer is not applied here, the caller adds it so tests can use an in-memory store.
pub fn routes(state: AppState) -> Router {
    let site = Router::new().fallback_service(ServeDir::new(&state.config.site_root));

    routes_for_site(state, site)
}

/// Builds the application's HTTP router with `site` as the gated service.
pub fn routes_for_site(state: AppState, site: Router) -> Router {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "frontgate", description = "frontgate API"),
        modifiers(&AdminTokenAddon),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Visitor login state"),
            (name = controller::settings::SETTINGS_TAG, description = "Gate settings administration"),
        )
    )]
    struct ApiDoc;

    let (api_routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::get_status))
        .routes(routes!(
            controller::settings::get_settings,
            controller::settings::put_settings
        ))
        .split_for_parts();

    let gated_site = site.layer(middleware::from_fn_with_state(
        state.clone(),
        controller::gate::gate,
    ));

    api_routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .fallback_service(gated_site)
        .with_state(state)
}
