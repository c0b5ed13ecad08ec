//! Views for the nickname manager

mod settings;

pub use settings::settings_view;
