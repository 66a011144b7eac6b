//! frontgate puts a site's front-end pages behind an Auth0-style identity provider.
//!
//! The gate runs as axum middleware in front of the site. Visitors without a login flag in
//! their session are sent to the provider's hosted login page, the provider's callback marks
//! the session as logged in, and admin URLs are exempted from the gate entirely.

pub mod model;
pub mod server;
