use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Widget},
};

use crate::app::AppState;

use super::theme::Theme;

/// Scrolling view of the run's output
pub struct LogView<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> LogView<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Rows available for lines inside the border
    pub fn inner_height(area: Rect) -> usize {
        area.height.saturating_sub(2) as usize
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 4 {
            return;
        }

        if self.state.lines.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "Nothing cleaned yet",
                Style::default().fg(self.theme.fg_muted),
            );
            return;
        }

        let max_len = inner.width as usize;
        let top = self.state.top_line();
        for (row, line) in self
            .state
            .lines
            .iter()
            .skip(top)
            .take(inner.height as usize)
            .enumerate()
        {
            let mut style = Style::default().fg(self.theme.line_color(&line.text, line.tag));
            if line.is_error() || line.text.starts_with("Total size:") {
                style = style.add_modifier(Modifier::BOLD);
            }

            // Keep the end of long paths visible
            let count = line.text.chars().count();
            let text = if count > max_len {
                let tail: String = line.text.chars().skip(count - max_len + 3).collect();
                format!("...{}", tail)
            } else {
                line.text.clone()
            };

            buf.set_string(inner.x, inner.y + row as u16, &text, style);
        }
    }
}
