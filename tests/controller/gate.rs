use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use frontgate::server::service::settings::{PROVIDER_OPTION, SETTINGS_OPTION};
use frontgate_test_utils::{
    constant::{TEST_CLIENT_ID, TEST_DOMAIN, TEST_NATIVE_AUTH_COOKIE_PREFIX},
    prelude::*,
};
use serde_json::{json, Value};

use crate::util::{body_string, location, query_params, TestApp, SITE_BODY};

fn configured(extra: Value) -> TestBuilder {
    let mut settings = json!({ "client_id": TEST_CLIENT_ID, "domain": TEST_DOMAIN });

    if let (Some(settings), Some(extra)) = (settings.as_object_mut(), extra.as_object()) {
        settings.extend(extra.clone());
    }

    TestBuilder::new().with_json_option(SETTINGS_OPTION, settings)
}

/// Logs the app's session in through the callback
async fn log_in(app: &mut TestApp) {
    let response = app.get("/?code=abc&state=RANDOM_STATE&callback=1").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

mod admin_area {
    use super::*;

    /// Expect admin & login URLs to reach the site for anonymous visitors
    #[tokio::test]
    async fn admin_paths_always_bypass() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({ "bypass_for_logged_in": "no" }))).await?;

        for path in ["/wp-admin/", "/wp-admin/options-general.php", "/wp-login.php"] {
            let response = app.get(path).await;

            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert_eq!(body_string(response).await, SITE_BODY);
        }

        Ok(())
    }

    /// Expect callback & logout markers to be ignored under the admin area
    #[tokio::test]
    async fn admin_area_ignores_callback() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app.get("/wp-admin/?callback=1&code=abc&state=x").await;
        assert_eq!(response.status(), StatusCode::OK);

        let status = app.get("/api/auth/status").await;
        let status: Value = serde_json::from_str(&body_string(status).await).unwrap();
        assert_eq!(status["logged_in"], false);

        Ok(())
    }

    /// Expect an admin-area redirect to the provider to be suppressed
    #[tokio::test]
    async fn blocks_redirect_to_provider() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app
            .get("/wp-admin/go?to=https%3A%2F%2Ftenant.auth0.com%2Fauthorize")
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(location(&response).is_none());

        Ok(())
    }

    /// Expect a redirect to the provider plugin's custom domain to be suppressed while unused
    #[tokio::test]
    async fn blocks_redirect_to_unused_custom_domain() -> Result<(), TestError> {
        let builder = configured(json!({}))
            .with_json_option(PROVIDER_OPTION, json!({ "custom_domain": "login.example.com" }));
        let mut app = TestApp::new(builder).await?;

        let response = app
            .get("/wp-admin/go?to=https%3A%2F%2Flogin.example.com%2Fauthorize")
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(location(&response).is_none());

        Ok(())
    }

    /// Expect an admin-area redirect within the site to go ahead
    #[tokio::test]
    async fn allows_redirect_within_site() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app
            .get("/wp-admin/go?to=https%3A%2F%2Fsite.example%2Fwp-admin%2F")
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("https://site.example/wp-admin/"));

        Ok(())
    }

    /// Expect redirects to the provider to go ahead during a password reset
    #[tokio::test]
    async fn allows_provider_redirect_during_password_reset() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app
            .get("/wp-admin/go?action=rp&to=https%3A%2F%2Ftenant.auth0.com%2Fauthorize")
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            Some("https://tenant.auth0.com/authorize")
        );

        Ok(())
    }
}

mod require_login {
    use super::*;

    /// Expect an anonymous visitor to be sent to the provider with the requested URL as state
    #[tokio::test]
    async fn redirects_to_provider() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app.get("/members?page=2").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = location(&response).unwrap();
        assert!(location.starts_with(&format!("https://{}/authorize?", TEST_DOMAIN)));

        let params = query_params(location);
        assert_eq!(params["client_id"], TEST_CLIENT_ID);
        assert_eq!(params["state"], "https://site.example/members?page=2");
        assert_eq!(params["redirect_uri"], "https://site.example/?callback=1");

        Ok(())
    }

    /// Expect the intermediate login page when auto redirect is off
    #[tokio::test]
    async fn redirects_to_login_page_without_auto_redirect() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({ "auto_redirect": "no" }))).await?;

        let response = app.get("/members").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let params = query_params(location(&response).unwrap());
        assert_eq!(params["auth0_login"], "1");
        assert_eq!(params["redirect_to"], "https://site.example/members");

        Ok(())
    }

    /// Expect the provider's own settings record to be used when inheriting
    #[tokio::test]
    async fn uses_provider_plugin_settings() -> Result<(), TestError> {
        let builder = TestBuilder::new().with_json_option(
            PROVIDER_OPTION,
            json!({ "client_id": "inherited", "domain": "inherited.auth0.com" }),
        );
        let mut app = TestApp::new(builder).await?;

        let response = app.get("/members").await;

        let location = location(&response).unwrap();
        assert!(location.starts_with("https://inherited.auth0.com/authorize?"));
        assert_eq!(query_params(location)["client_id"], "inherited");

        Ok(())
    }

    /// Expect a fatal error when no provider is configured
    #[tokio::test]
    async fn fails_without_provider() -> Result<(), TestError> {
        let mut app = TestApp::new(TestBuilder::new()).await?;

        let response = app.get("/members").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response)
            .await
            .contains("Auth0 is not properly configured"));

        Ok(())
    }
}

mod bypass {
    use super::*;

    /// Expect exact & wildcard excluded paths to bypass and others to be gated
    #[tokio::test]
    async fn excluded_paths() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({
            "excluded_paths": "about\nblog/*\nproducts/category-*"
        })))
        .await?;

        for path in ["/about", "/about/", "/blog/post-1", "/products/category-shoes"] {
            let response = app.get(path).await;

            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }

        for path in ["/about/team", "/members", "/products/item-1"] {
            let response = app.get(path).await;

            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        }

        Ok(())
    }

    /// Expect background requests to reach the site
    #[tokio::test]
    async fn background_requests() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let request = Request::get("/members")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;

        assert_eq!(response.status(), StatusCode::OK);

        Ok(())
    }

    /// Expect the native login cookie to bypass only while the setting is on
    #[tokio::test]
    async fn native_login_cookie() -> Result<(), TestError> {
        let cookie = format!("{}abc123=user%7C1", TEST_NATIVE_AUTH_COOKIE_PREFIX);
        let native_request = || {
            Request::get("/members")
                .header(header::COOKIE, cookie.as_str())
                .body(Body::empty())
                .unwrap()
        };

        let mut app = TestApp::new(configured(json!({}))).await?;
        let response = app.send(native_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let mut app = TestApp::new(configured(json!({ "bypass_for_logged_in": "no" }))).await?;
        let response = app.send(native_request()).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        Ok(())
    }
}

mod callback {
    use super::*;

    /// Expect the callback to set the flag and redirect to the state URL
    #[tokio::test]
    async fn logs_in_and_redirects_to_state() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app
            .get("/?code=abc123&state=https%3A%2F%2Fsite%2Fx&callback=1")
            .await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("https://site/x"));

        let response = app.get("/members").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, SITE_BODY);

        Ok(())
    }

    /// Expect a state carrying a line break to still log in, with the break removed
    #[tokio::test]
    async fn state_with_line_break_still_logs_in() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app
            .get("/?code=abc&state=https%3A%2F%2Fsite%2Fx%0Ay&callback=1")
            .await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("https://site/xy"));

        let status = app.get("/api/auth/status").await;
        let status: Value = serde_json::from_str(&body_string(status).await).unwrap();
        assert_eq!(status["logged_in"], true);

        Ok(())
    }

    /// Expect the sentinel state to redirect to the site home
    #[tokio::test]
    async fn sentinel_state_redirects_home() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app.get("/?code=abc&state=RANDOM_STATE&callback=1").await;

        assert_eq!(location(&response), Some("https://site.example"));

        Ok(())
    }

    /// Expect a repeated callback to leave the visitor logged in with the same redirect
    #[tokio::test]
    async fn repeated_callback() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;
        let uri = "/?code=abc123&state=https%3A%2F%2Fsite%2Fx&callback=1";

        let first = app.get(uri).await;
        let second = app.get(uri).await;

        assert_eq!(location(&first), location(&second));
        assert_eq!(app.get("/members").await.status(), StatusCode::OK);

        Ok(())
    }

    /// Expect a callback without state to fall through to the login flow bypass
    #[tokio::test]
    async fn callback_without_state_reaches_site() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app.get("/?callback=1&code=abc").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.get("/members").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        Ok(())
    }

    /// Expect the flag to belong to the session, a new session is gated again
    #[tokio::test]
    async fn flag_is_per_session() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        log_in(&mut app).await;
        app.forget_session();

        let response = app.get("/members").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        Ok(())
    }
}

mod logout {
    use super::*;

    /// Expect logout to clear the flag and redirect to the provider logout URL
    #[tokio::test]
    async fn clears_flag_and_signs_out_at_provider() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;
        log_in(&mut app).await;

        let response = app.get("/?auth0_logout=1").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = location(&response).unwrap();
        assert!(location.starts_with(&format!("https://{}/v2/logout?", TEST_DOMAIN)));
        let params = query_params(location);
        assert_eq!(params["client_id"], TEST_CLIENT_ID);
        assert_eq!(params["returnTo"], "https://site.example/");

        let response = app.get("/members").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

        Ok(())
    }

    /// Expect logout to redirect to the site home without a configured provider
    #[tokio::test]
    async fn redirects_home_without_provider() -> Result<(), TestError> {
        let mut app = TestApp::new(TestBuilder::new()).await?;

        let response = app.get("/?auth0_logout=1").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("https://site.example"));

        Ok(())
    }
}

mod login_page {
    use super::*;

    /// Expect the default page linking to the provider
    #[tokio::test]
    async fn renders_default_page() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({}))).await?;

        let response = app
            .get("/?auth0_login=1&redirect_to=https%3A%2F%2Fsite.example%2Fmembers")
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Login Required"));
        assert!(body.contains(&format!("https://{}/authorize?", TEST_DOMAIN)));

        Ok(())
    }

    /// Expect the custom template with the login URL substituted
    #[tokio::test]
    async fn renders_custom_template() -> Result<(), TestError> {
        let mut app = TestApp::new(configured(json!({
            "custom_login_html": "<a id=\"go\" href=\"{{login_url}}\">Sign in</a>"
        })))
        .await?;

        let response = app.get("/?auth0_login=1").await;

        let body = body_string(response).await;
        assert!(body.starts_with(&format!("<a id=\"go\" href=\"https://{}/authorize?", TEST_DOMAIN)));
        assert!(!body.contains("{{login_url}}"));

        Ok(())
    }

    /// Expect a fatal error when no provider is configured
    #[tokio::test]
    async fn fails_without_provider() -> Result<(), TestError> {
        let mut app = TestApp::new(TestBuilder::new()).await?;

        let response = app.get("/?auth0_login=1").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}
