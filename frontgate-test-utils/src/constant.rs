pub static TEST_SITE_URL: &str = "https://site.example";
pub static TEST_CLIENT_ID: &str = "test_client_id";
pub static TEST_DOMAIN: &str = "tenant.auth0.com";
pub static TEST_ADMIN_TOKEN: &str = "test_admin_token";
pub static TEST_NATIVE_AUTH_COOKIE_PREFIX: &str = "wordpress_logged_in_";
