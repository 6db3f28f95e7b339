use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::centered_rect;
use super::theme::Theme;

/// Confirmation dialog shown before a deleting run starts
pub struct ConfirmRunView<'a> {
    operations: &'a [String],
    theme: &'a Theme,
}

impl<'a> ConfirmRunView<'a> {
    pub fn new(operations: &'a [String], theme: &'a Theme) -> Self {
        Self { operations, theme }
    }
}

impl Widget for ConfirmRunView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let listed = self.operations.len().min(8) as u16;
        let dialog_area = centered_rect(50, 8 + listed, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Delete? ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        if inner.height < 2 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let op_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        buf.set_string(
            inner.x,
            inner.y,
            "Permanently delete files for:",
            text_style,
        );

        let hints_y = inner.y + inner.height - 1;
        let max_len = inner.width.saturating_sub(2) as usize;
        for (i, op) in self.operations.iter().take(listed as usize).enumerate() {
            let y = inner.y + 2 + i as u16;
            if y >= hints_y {
                break;
            }
            let name: String = op.chars().take(max_len).collect();
            buf.set_string(inner.x + 2, y, &name, op_style);
        }
        if self.operations.len() > listed as usize {
            let more = format!("... and {} more", self.operations.len() - listed as usize);
            let y = inner.y + 2 + listed;
            if y < hints_y {
                buf.set_string(inner.x + 2, y, &more, Style::default().fg(self.theme.fg_dim));
            }
        }

        buf.set_string(inner.x, hints_y, "[y]", key_style);
        buf.set_string(inner.x + 4, hints_y, "Yes, delete", text_style);
        buf.set_string(inner.x + 18, hints_y, "[n]", key_style);
        buf.set_string(inner.x + 22, hints_y, "Cancel", text_style);
    }
}
