//! Service layer.
//!
//! Settings persistence, the gate's decision logic and the provider login, callback & logout
//! flows. Decision functions are pure over a [`GateRequest`](crate::server::model::request::GateRequest)
//! and the request's settings so they can be tested without a running server.

pub mod auth;
pub mod bypass;
pub mod gate;
pub mod redirect_guard;
pub mod settings;
