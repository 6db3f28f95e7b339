use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use scour_core::{Host, RunState, Tag};

use super::selection::Selection;

/// Spinner frames advance at most this often
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Waiting for the user to approve deleting
    Confirm,
    /// Cleaning run in progress
    Running,
    /// Run complete, log can be browsed
    Done,
}

/// One line of cleaning output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub tag: Option<Tag>,
}

impl LogLine {
    pub fn is_error(&self) -> bool {
        self.tag == Some(Tag::Error)
    }
}

/// Application state; also the host the cleaning run reports to
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Deleting rather than previewing
    pub really_delete: bool,
    /// What to clean
    pub selection: Selection,
    /// Output of the run
    pub lines: Vec<LogLine>,
    /// Progress fraction 0.0..=1.0
    pub progress: f64,
    /// Progress label
    pub progress_label: String,
    /// Whether the run holds the interface
    pub busy: bool,
    /// Latest counters from the run
    pub run: RunState,
    /// Bytes freed, updated by the run's total-size callback
    pub bytes_freed: Rc<Cell<u64>>,
    /// First visible log line (when not following)
    pub scroll_offset: usize,
    /// Keep the newest line in view
    pub follow: bool,
    /// Visible log height (set by UI)
    pub visible_height: usize,
    /// Spinner frame for animation
    pub spinner_frame: usize,
    last_spin: Instant,
    /// Help overlay open
    pub show_help: bool,
    /// Whether app should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(selection: Selection, really_delete: bool, confirm_first: bool) -> Self {
        Self {
            mode: if confirm_first {
                AppMode::Confirm
            } else {
                AppMode::Running
            },
            really_delete,
            selection,
            lines: Vec::new(),
            progress: 0.0,
            progress_label: String::new(),
            busy: false,
            run: RunState::default(),
            bytes_freed: Rc::new(Cell::new(0)),
            scroll_offset: 0,
            follow: true,
            visible_height: 20,
            spinner_frame: 0,
            last_spin: Instant::now(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn freed(&self) -> u64 {
        self.bytes_freed.get()
    }

    /// Advance spinner animation
    pub fn tick_spinner(&mut self) {
        if self.last_spin.elapsed() >= SPINNER_INTERVAL {
            self.spinner_frame = (self.spinner_frame + 1) % 10;
            self.last_spin = Instant::now();
        }
    }

    /// Largest useful scroll offset
    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_height)
    }

    /// First line to draw
    pub fn top_line(&self) -> usize {
        if self.follow {
            self.max_scroll()
        } else {
            self.scroll_offset.min(self.max_scroll())
        }
    }

    fn unfollow(&mut self) {
        if self.follow {
            self.scroll_offset = self.max_scroll();
            self.follow = false;
        }
    }

    fn refollow_at_bottom(&mut self) {
        if self.scroll_offset >= self.max_scroll() {
            self.follow = true;
        }
    }

    pub fn scroll_up(&mut self) {
        self.unfollow();
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.unfollow();
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
        self.refollow_at_bottom();
    }

    pub fn page_up(&mut self) {
        self.unfollow();
        let page_size = self.visible_height.saturating_sub(2).max(1);
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self) {
        self.unfollow();
        let page_size = self.visible_height.saturating_sub(2).max(1);
        self.scroll_offset = (self.scroll_offset + page_size).min(self.max_scroll());
        self.refollow_at_bottom();
    }

    pub fn go_to_first(&mut self) {
        self.follow = false;
        self.scroll_offset = 0;
    }

    pub fn go_to_last(&mut self) {
        self.follow = true;
    }

    pub fn show_help(&mut self) {
        self.show_help = true;
    }

    pub fn hide_help(&mut self) {
        self.show_help = false;
    }

    /// User approved deleting
    pub fn confirm(&mut self) {
        if self.mode == AppMode::Confirm {
            self.mode = AppMode::Running;
        }
    }

    /// Mark the run complete even if the host was never told
    pub fn finish_run(&mut self) {
        self.mode = AppMode::Done;
        self.busy = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Host for AppState {
    fn selected_operations(&self) -> Vec<String> {
        self.selection.operations.clone()
    }

    fn operation_options(&self, operation: &str) -> Vec<(String, bool)> {
        self.selection.options_for(operation)
    }

    fn append_text(&mut self, line: &str, tag: Option<Tag>) {
        self.lines.push(LogLine {
            text: line.to_string(),
            tag,
        });
    }

    fn set_progress(&mut self, fraction: f64, label: &str) {
        self.progress = fraction;
        self.progress_label = label.to_string();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        if !busy && self.mode == AppMode::Running {
            self.mode = AppMode::Done;
        }
    }

    fn clear_text(&mut self) {
        self.lines.clear();
        self.scroll_offset = 0;
        self.follow = true;
    }
}
