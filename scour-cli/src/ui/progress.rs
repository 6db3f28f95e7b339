use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::{AppMode, AppState};

use super::bar_chart::render_bar;
use super::theme::Theme;

/// Braille spinner characters
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Progress bar with percentage and the run's progress label
pub struct ProgressView<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> ProgressView<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for ProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let bar_width = (area.width / 3) as usize;
        let bar = render_bar(self.state.progress, bar_width);
        let bar_color = if self.state.mode == AppMode::Done {
            self.theme.green
        } else {
            self.theme.blue
        };
        buf.set_string(area.x + 1, area.y, &bar, Style::default().fg(bar_color));

        let pct = format!(" {:>3.0}% ", self.state.progress * 100.0);
        let pct_x = area.x + 1 + bar_width as u16;
        buf.set_string(
            pct_x,
            area.y,
            &pct,
            Style::default()
                .fg(self.theme.fg)
                .add_modifier(Modifier::BOLD),
        );

        let label_x = pct_x + pct.len() as u16;
        let max_len = (area.x + area.width).saturating_sub(label_x + 1) as usize;
        let label: String = self.state.progress_label.chars().take(max_len).collect();
        buf.set_string(label_x, area.y, &label, Style::default().fg(self.theme.fg_dim));
    }
}

/// Compact activity indicator for the header
pub fn activity_indicator(state: &AppState) -> String {
    match state.mode {
        AppMode::Confirm => "Waiting for confirmation".to_string(),
        AppMode::Running => {
            let spinner = SPINNER[state.spinner_frame % SPINNER.len()];
            let verb = if state.really_delete {
                "Cleaning"
            } else {
                "Scanning"
            };
            format!("{} {}...", spinner, verb)
        }
        AppMode::Done => "Done".to_string(),
    }
}
