//! Data transfer objects shared by the HTTP API.

pub mod api;
pub mod auth;
pub mod settings;
