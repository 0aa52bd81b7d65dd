//! Headless logic of the provider settings page.
//!
//! The page is an Elm-style state machine: [`state::DataSourceItem`] receives
//! [`state::Action`]s and answers with [`state::Effect`]s, the IO requests the
//! host has to run. [`driver::perform`] runs one effect against the service
//! traits of [`services`] and turns its outcome back into actions.

pub mod codec;
pub mod config;
pub mod driver;
pub mod error;
pub mod form;
pub mod i18n;
pub mod loader;
pub mod merge;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::{perform, DataSourceItemController};
pub use error::SettingsError;
pub use state::{Action, DataSourceItem, Effect};
