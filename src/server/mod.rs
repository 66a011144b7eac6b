//! Server application core modules.
//!
//! This module contains the gate middleware and its policy chain, the provider login & logout
//! flows, settings storage and the HTTP routes exposing login state and settings administration.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
