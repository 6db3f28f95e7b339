/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scroll the log up one line
    ScrollUp,
    /// Scroll the log down one line
    ScrollDown,
    /// Scroll up by a page
    PageUp,
    /// Scroll down by a page
    PageDown,
    /// Jump to the first line
    GoToFirst,
    /// Jump to the last line and follow new output
    GoToLast,
    /// Show help overlay
    ShowHelp,
    /// Hide help overlay
    HideHelp,
    /// Start deleting
    Confirm,
    /// Decline deleting
    Cancel,
    /// Quit the application (abandons a running clean)
    Quit,
    /// No action (for tick events)
    Tick,
}
