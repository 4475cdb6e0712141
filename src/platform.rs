//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the paste shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const PASTE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Paste shortcut display for help text
#[cfg(target_os = "macos")]
pub const PASTE_SHORTCUT: &str = "Cmd+V";

#[cfg(not(target_os = "macos"))]
pub const PASTE_SHORTCUT: &str = "Ctrl+V";

/// Submit shortcut display. Ctrl+S works on all platforms.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Reset shortcut display
pub const RESET_SHORTCUT: &str = "Ctrl+R";
