use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::{AppMode, AppState};

use super::progress::activity_indicator;
use super::theme::Theme;

/// Header widget showing title, selected operations, and status
pub struct Header<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        // Title
        let title = "SCOUR";
        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, title, title_style);

        // Separator
        buf.set_string(
            area.x + 7,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        // Mode and operations
        let (mode, mode_color) = if self.state.really_delete {
            ("Delete", self.theme.red)
        } else {
            ("Preview", self.theme.green)
        };
        buf.set_string(
            area.x + 9,
            area.y,
            mode,
            Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
        );

        let ops = self.state.selection.operations.join(", ");
        let ops_x = area.x + 9 + mode.len() as u16 + 1;
        let max_ops_len = area.width.saturating_sub(ops_x - area.x + 36) as usize;
        let display_ops = if ops.chars().count() > max_ops_len {
            let head: String = ops.chars().take(max_ops_len.saturating_sub(3)).collect();
            format!("{}...", head)
        } else {
            ops
        };
        buf.set_string(ops_x, area.y, &display_ops, Style::default().fg(self.theme.fg));

        // Status (right-aligned)
        let status = match self.state.mode {
            AppMode::Confirm => activity_indicator(self.state),
            _ => format!(
                "{}  {} paths, {} errors",
                activity_indicator(self.state),
                scour_core::format_count(self.state.run.paths_cleaned),
                scour_core::format_count(self.state.run.errors)
            ),
        };
        let status_len = status.chars().count() as u16;
        if status_len + 2 >= area.width {
            return;
        }
        let status_x = area.x + area.width - status_len - 2;
        let status_style = if self.state.busy && self.state.mode == AppMode::Running {
            Style::default().fg(self.theme.yellow)
        } else {
            Style::default().fg(self.theme.fg_dim)
        };
        buf.set_string(status_x, area.y, &status, status_style);
    }
}
