//! Shared models and headless settings logic for the data-source provider
//! settings page.
//!
//! - [`model`] holds the serde shapes exchanged with the backend services.
//! - [`requests`] holds query/request payloads.
//! - [`settings`] holds the form engine and the state machine driving the
//!   provider settings page, independent from any UI toolkit.

pub mod model;
pub mod requests;
pub mod settings;
