use std::io::{self, BufRead, Write};

use color_eyre::Result;
use scour_core::{Host, Tag, Tick, Worker};

use crate::app::Selection;

/// Host that writes the run to stdout line by line
pub struct PlainHost {
    selection: Selection,
}

impl PlainHost {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }
}

impl Host for PlainHost {
    fn selected_operations(&self) -> Vec<String> {
        self.selection.operations.clone()
    }

    fn operation_options(&self, operation: &str) -> Vec<(String, bool)> {
        self.selection.options_for(operation)
    }

    fn append_text(&mut self, line: &str, tag: Option<Tag>) {
        match tag {
            Some(Tag::Error) => println!("error: {}", line),
            None => println!("{}", line),
        }
    }

    fn set_progress(&mut self, fraction: f64, label: &str) {
        println!("[{:>3.0}%] {}", fraction * 100.0, label);
    }

    fn set_busy(&mut self, _busy: bool) {}
}

/// Ask on stdin before deleting; anything but yes declines
pub fn confirm_delete(operations: &[String]) -> Result<bool> {
    print!(
        "Permanently delete files for {}? [y/N] ",
        operations.join(", ")
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES" | "Yes"))
}

/// Drive the run to completion without a terminal interface.
///
/// Returns the number of error lines the run reported.
pub fn run<H: Host>(mut worker: Worker<H>) -> u64 {
    while let Some(tick) = worker.next() {
        if tick == Tick::Done {
            break;
        }
    }
    worker.state().errors
}
