/// Styling hint attached to a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Error,
}

/// The user interface a cleaning run reports to.
///
/// Calls are made synchronously from inside the run; a host that blocks
/// stalls the run.
pub trait Host {
    /// Operation ids to run, in order
    fn selected_operations(&self) -> Vec<String>;

    /// (option, enabled) pairs to apply to one operation's backend
    fn operation_options(&self, operation: &str) -> Vec<(String, bool)>;

    /// Append one line to the log
    fn append_text(&mut self, line: &str, tag: Option<Tag>);

    /// Update the progress indicator
    fn set_progress(&mut self, fraction: f64, label: &str);

    /// While busy the host should not accept new work
    fn set_busy(&mut self, busy: bool);

    /// Forget lines from a previous run
    fn clear_text(&mut self) {}
}

impl<H: Host + ?Sized> Host for &mut H {
    fn selected_operations(&self) -> Vec<String> {
        (**self).selected_operations()
    }

    fn operation_options(&self, operation: &str) -> Vec<(String, bool)> {
        (**self).operation_options(operation)
    }

    fn append_text(&mut self, line: &str, tag: Option<Tag>) {
        (**self).append_text(line, tag)
    }

    fn set_progress(&mut self, fraction: f64, label: &str) {
        (**self).set_progress(fraction, label)
    }

    fn set_busy(&mut self, busy: bool) {
        (**self).set_busy(busy)
    }

    fn clear_text(&mut self) {
        (**self).clear_text()
    }
}
