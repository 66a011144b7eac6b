//! Single policy chain that decides what the gate does with a request.
//!
//! Both "require login on the front-end" and "leave the admin area alone" are owned here, so
//! there is exactly one place that orders them. Admin URLs are checked first and switch the
//! front-end gate off completely, including callback & logout handling.

use crate::{
    model::settings::GateSettings,
    server::{
        model::request::GateRequest,
        service::bypass::{is_admin_path, should_bypass, BypassReason},
    },
};

pub const CALLBACK_PARAM: &str = "callback";
pub const CODE_PARAM: &str = "code";
pub const STATE_PARAM: &str = "state";
pub const LOGIN_PARAM: &str = "auth0_login";
pub const LOGOUT_PARAM: &str = "auth0_logout";
pub const REDIRECT_TO_PARAM: &str = "redirect_to";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateAction {
    /// Admin or login area, the gate is off and outbound redirects are filtered
    AdminPassThrough,
    /// Serve the request untouched
    PassThrough(BypassReason),
    /// Provider redirected back, mark the session logged in and continue to `state`
    Callback { state: String },
    /// Render the intermediate login page linking to the provider
    LoginPage { redirect_to: Option<String> },
    /// Clear the login flag and sign out at the provider
    Logout,
    /// Visitor has to log in, `return_to` is the absolute URL they asked for
    RequireLogin { return_to: String },
}

/// Decides what to do with a request.
///
/// # Arguments
/// - `request` - Request view, with `session_logged_in` already filled in
/// - `settings` - Settings loaded for this request
/// - `site_origin` - Scheme, host & port of the site, used to rebuild the requested URL
pub fn decide(request: &GateRequest, settings: &GateSettings, site_origin: &str) -> GateAction {
    if is_admin_path(&request.path) {
        return GateAction::AdminPassThrough;
    }

    if request.is_background {
        return GateAction::PassThrough(BypassReason::Background);
    }

    if request.param(CALLBACK_PARAM) == Some("1") {
        let code = request.param(CODE_PARAM).filter(|c| !c.is_empty());
        let state = request.param(STATE_PARAM).filter(|s| !s.is_empty());

        if let (Some(_), Some(state)) = (code, state) {
            return GateAction::Callback {
                state: state.to_string(),
            };
        }
    }

    if request.has_param(LOGIN_PARAM) {
        return GateAction::LoginPage {
            redirect_to: request
                .param(REDIRECT_TO_PARAM)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        };
    }

    if request.has_param(LOGOUT_PARAM) {
        return GateAction::Logout;
    }

    if let Some(reason) = should_bypass(request, settings) {
        return GateAction::PassThrough(reason);
    }

    GateAction::RequireLogin {
        return_to: format!("{}{}", site_origin, request.path_and_query),
    }
}
