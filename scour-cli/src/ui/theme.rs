use ratatui::style::Color;

use scour_core::Tag;

/// Catppuccin Mocha-inspired dark theme with 24-bit RGB colors
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub bg_surface: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_muted: Color,

    // Accent colors
    pub blue: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub teal: Color,

    // UI elements
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Catppuccin Mocha base
            bg: Color::Rgb(30, 30, 46),         // Base
            bg_surface: Color::Rgb(49, 50, 68), // Surface0
            fg: Color::Rgb(205, 214, 244),      // Text
            fg_dim: Color::Rgb(166, 173, 200),  // Subtext0
            fg_muted: Color::Rgb(127, 132, 156), // Overlay0

            // Accent colors
            blue: Color::Rgb(137, 180, 250),   // Blue
            green: Color::Rgb(166, 227, 161),  // Green
            yellow: Color::Rgb(249, 226, 175), // Yellow
            red: Color::Rgb(243, 139, 168),    // Red
            teal: Color::Rgb(148, 226, 213),   // Teal

            // UI
            border: Color::Rgb(88, 91, 112), // Surface2
        }
    }
}

impl Theme {
    /// Text color for a log line
    pub fn line_color(&self, text: &str, tag: Option<Tag>) -> Color {
        match tag {
            Some(Tag::Error) => self.red,
            None if text.starts_with("* ") || text.starts_with("Special operation:") => self.teal,
            None if text.starts_with("Total size:") => self.green,
            None => self.fg,
        }
    }
}
