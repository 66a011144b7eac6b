//! Utility functions shared by services.
//!
//! Input sanitization for the settings record and HTML escaping for rendered pages.

pub mod html;
pub mod sanitize;
