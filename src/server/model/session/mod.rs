//! Session data models.
//!
//! Type-safe wrappers for values kept in the visitor's tower-sessions session.

pub mod auth;
