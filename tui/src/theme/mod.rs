//! Theme and Colors
//!
//! The chat palette: a blue-to-violet accent pair, white agent bubbles, and
//! a few greys for secondary text.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Accent Palette
// ============================================================================

/// Accent start - periwinkle blue (#667eea)
pub const ACCENT_BLUE: Color = Color::Rgb(102, 126, 234);

/// Accent end - violet (#764ba2)
pub const ACCENT_VIOLET: Color = Color::Rgb(118, 75, 162);

// ============================================================================
// Bubble Colors
// ============================================================================

/// User bubble background
pub const USER_BUBBLE: Color = ACCENT_BLUE;

/// User bubble text
pub const USER_TEXT: Color = Color::Rgb(255, 255, 255);

/// Agent bubble background
pub const AGENT_BUBBLE: Color = Color::Rgb(242, 242, 247);

/// Agent bubble text (#333)
pub const AGENT_TEXT: Color = Color::Rgb(51, 51, 51);

// ============================================================================
// UI Colors
// ============================================================================

/// Subtitle and hint text (#666)
pub const SUBTITLE_GRAY: Color = Color::Rgb(102, 102, 102);

/// Idle input border (#e0e0e0)
pub const INPUT_BORDER: Color = Color::Rgb(224, 224, 224);

/// Disabled send hint (#ccc)
pub const DISABLED_GRAY: Color = Color::Rgb(204, 204, 204);

/// Fade for content scrolled past the edges
pub const FADE_GRAY: Color = Color::Rgb(120, 120, 120);

/// Header title style
pub fn title_style() -> Style {
    Style::default()
        .fg(ACCENT_BLUE)
        .add_modifier(Modifier::BOLD)
}

/// Send hint style; greyed out when there is nothing sendable
pub fn send_hint_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(ACCENT_VIOLET)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DISABLED_GRAY)
    }
}
