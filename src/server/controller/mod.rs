//! HTTP handlers and the gate middleware.
//!
//! The gate wraps the site service and acts on every request reaching it. The `/api` handlers
//! sit outside the gate and report login state or manage settings.

pub mod auth;
pub mod gate;
pub mod settings;
pub mod util;
