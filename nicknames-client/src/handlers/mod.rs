//! Message handlers for the nickname manager
//!
//! Each submodule adds `handle_*` methods to [`crate::app::NicknamesApp`].

mod data;
mod nicknames;
mod settings;
