//! Server-side models.
//!
//! Application state shared with handlers, the request view the gate decides on, and typed
//! wrappers over session data.

pub mod app;
pub mod request;
pub mod session;
