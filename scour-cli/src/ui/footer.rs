use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::{AppMode, AppState};

use super::theme::Theme;

/// Footer widget showing keyboard hints and the running total
pub struct Footer<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.state.show_help {
            return vec![("Esc", "Close help"), ("q", "Quit")];
        }
        match self.state.mode {
            AppMode::Confirm => vec![("y", "Yes"), ("n", "Cancel")],
            AppMode::Running => vec![("↑↓", "Scroll"), ("?", "Help"), ("q", "Quit")],
            AppMode::Done => vec![
                ("↑↓", "Scroll"),
                ("g/G", "First/Last"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
        }
    }

    fn total_text(&self) -> Option<String> {
        if self.state.mode == AppMode::Confirm {
            return None;
        }
        if self.state.really_delete {
            Some(format!("Freed: {}", scour_core::format_size(self.state.freed())))
        } else {
            Some(format!(
                "Found: {}",
                scour_core::format_size(self.state.run.reclaimable_bytes)
            ))
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let hints = self.hints();

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.len() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }

        if let Some(total) = self.total_text() {
            let stats_style = Style::default()
                .fg(self.theme.green)
                .add_modifier(Modifier::BOLD);
            let total_len = total.chars().count() as u16;
            let stats_x = (area.x + area.width).saturating_sub(total_len + 1);
            if stats_x > x + 2 {
                buf.set_string(stats_x, area.y, &total, stats_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Selection;

    fn rendered(state: &AppState) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        Footer::new(state, &theme).render(area, &mut buf);
        (0..area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn test_preview_shows_found() {
        let mut state = AppState::new(Selection::default(), false, false);
        state.run.reclaimable_bytes = 1536;
        let line = rendered(&state);
        assert!(line.contains("Found: 1.5 KB"));
        assert!(!line.contains("Freed"));
    }

    #[test]
    fn test_delete_shows_freed() {
        let state = AppState::new(Selection::default(), true, false);
        state.bytes_freed.set(2048);
        assert!(rendered(&state).contains("Freed: 2.0 KB"));
    }

    #[test]
    fn test_confirm_shows_only_answers() {
        let state = AppState::new(Selection::default(), true, true);
        let line = rendered(&state);
        assert!(line.contains("Cancel"));
        assert!(!line.contains("Freed"));
    }
}
