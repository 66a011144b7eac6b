//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries so services never build queries themselves.

pub mod option;
