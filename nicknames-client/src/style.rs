//! Layout constants for the nickname manager

/// Padding inside text inputs
pub const INPUT_PADDING: f32 = 8.0;

/// Padding inside buttons
pub const BUTTON_PADDING: f32 = 10.0;

/// Padding around the whole form
pub const FORM_PADDING: f32 = 20.0;

/// Space between elements within a section
pub const ELEMENT_SPACING: f32 = 10.0;

/// Space between rows of a list
pub const SMALL_SPACING: f32 = 5.0;

/// Space between sections
pub const SPACER_SIZE_MEDIUM: f32 = 10.0;

pub const TITLE_SIZE: f32 = 18.0;
pub const TEXT_SIZE: f32 = 14.0;
pub const SMALL_TEXT_SIZE: f32 = 12.0;

/// Width of the user identifier column in the saved list
pub const USER_ID_WIDTH: f32 = 140.0;
