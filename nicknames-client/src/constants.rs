//! Application-wide constants

/// Application directory name (used in config directory path)
pub const APP_DIR_NAME: &str = "nicknames";

/// Extension of per-namespace storage files
pub const STORAGE_FILE_EXT: &str = "json";

/// File permissions for storage files on Unix (owner read/write only)
#[cfg(unix)]
pub const STORAGE_FILE_MODE: u32 = 0o600;

/// Minimum window size for the nickname manager
pub const WINDOW_WIDTH_MIN: f32 = 420.0;
pub const WINDOW_HEIGHT_MIN: f32 = 480.0;
