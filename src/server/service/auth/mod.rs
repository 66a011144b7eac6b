//! Provider login flow.
//!
//! Builds the provider's authorize & logout URLs, renders the intermediate login page and marks
//! the session logged in when the provider redirects back. The authorization code is never
//! exchanged or verified, its presence alone counts as a successful login.

pub mod callback;
pub mod login;
pub mod logout;
