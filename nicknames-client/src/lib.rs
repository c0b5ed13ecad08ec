//! Nicknames Client Library
//!
//! Client side of Nicknames Everywhere. A [`plugin::Plugin`] attaches to a
//! chat host through the seams described in [`host`] and overrides the name
//! shown for any user the person has given a nickname. Everything it
//! installs is recorded by the [`patch::PatchManager`] and removed again on
//! deactivation.
//!
//! The same crate ships `nicknames`, a standalone window for managing saved
//! nicknames and settings without a host.

pub mod app;
pub mod commands;
pub mod config;
pub mod constants;
mod handlers;
pub mod hook;
pub mod host;
pub mod i18n;
pub mod patch;
pub mod plugin;
pub mod style;
pub mod types;
pub mod ui;
mod views;

pub use app::NicknamesApp;
pub use plugin::{Plugin, PluginError};
