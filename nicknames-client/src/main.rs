//! Nicknames Everywhere - nickname manager
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use nicknames_client::NicknamesApp;
use nicknames_client::constants::{WINDOW_HEIGHT_MIN, WINDOW_WIDTH_MIN};
use tracing_subscriber::EnvFilter;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    iced::application(NicknamesApp::new, NicknamesApp::update, NicknamesApp::view)
        .title(NicknamesApp::title)
        .window(iced::window::Settings {
            min_size: Some(iced::Size::new(WINDOW_WIDTH_MIN, WINDOW_HEIGHT_MIN)),
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: "nicknames".to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
        .run()
}
