//! Theme and Colors
//!
//! Shared styles for the termagotchi UI.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// List styles
// ============================================================================

/// Regular list text.
pub const TEXT: Style = Style::new().fg(Color::White);

/// Selected list row, matching the classic yellow-on-black cursor.
pub const SELECTED: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Section headers inside pages ("=== STATS ===" and friends).
pub const HEADER: Style = Style::new().fg(Color::Yellow);

/// Dimmed informational text (info bar, footers).
pub const DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// Modal styles
// ============================================================================

/// Modal body text.
pub const MODAL_TEXT: Style = Style::new().fg(Color::White);

/// The focused modal button.
pub const MODAL_FOCUSED: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// An unfocused modal button.
pub const MODAL_BUTTON: Style = Style::new().fg(Color::Yellow);
