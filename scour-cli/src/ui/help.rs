use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::centered_rect;
use super::theme::Theme;

/// Help overlay widget
pub struct HelpView<'a> {
    theme: &'a Theme,
}

impl<'a> HelpView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(44, 17, area);

        Clear.render(help_area, buf);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.blue))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(help_area);
        block.render(help_area, buf);

        let key_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg);
        let section_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);

        let help_items = [
            ("", "Log", true),
            ("↑ k", "Scroll up", false),
            ("↓ j", "Scroll down", false),
            ("PgUp/PgDn", "Page up/down", false),
            ("Space", "Page down", false),
            ("Home g", "Go to first line", false),
            ("End G", "Follow newest line", false),
            ("", "", false),
            ("", "Other", true),
            ("?", "Show this help", false),
            ("Esc", "Close help", false),
            ("q Ctrl+C", "Quit", false),
        ];

        for (i, (key, desc, is_section)) in help_items.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }

            let y = inner.y + i as u16;

            if *is_section {
                buf.set_string(inner.x, y, *desc, section_style);
            } else if !key.is_empty() {
                buf.set_string(inner.x, y, format!("{:12}", key), key_style);
                buf.set_string(inner.x + 12, y, *desc, desc_style);
            }
        }
    }
}
