//! Color palette for the UI theme

use egui::Color32;

// =============================================================================
// Backgrounds
// =============================================================================

/// Log and text field background
pub const BG_BASE: Color32 = Color32::from_rgb(24, 24, 28);
/// Window background
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 35);
/// Dialogs and popups
pub const BG_ELEVATED: Color32 = Color32::from_rgb(38, 38, 44);
pub const BG_INPUT: Color32 = Color32::from_rgb(45, 45, 52);
pub const BG_HOVER: Color32 = Color32::from_rgb(55, 55, 65);

// =============================================================================
// Borders
// =============================================================================

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 50, 58);
pub const BORDER_NORMAL: Color32 = Color32::from_rgb(65, 65, 75);

// =============================================================================
// Text
// =============================================================================

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 230, 235);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 170);

// =============================================================================
// Accent and status
// =============================================================================

pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(66, 150, 250);
/// Selection background
pub const ACCENT_SUBTLE: Color32 = Color32::from_rgba_premultiplied(66, 150, 250, 30);

/// Successful run
pub const SUCCESS: Color32 = Color32::from_rgb(80, 200, 120);
/// Failed run
pub const ERROR: Color32 = Color32::from_rgb(255, 90, 90);

/// Backdrop behind modal dialogs
pub fn modal_backdrop() -> Color32 {
    Color32::from_black_alpha(128)
}
