use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::backend::{BackendRegistry, PathStream, SpecialResult, SpecialStream};
use crate::error::BackendError;
use crate::size::format_size;

use super::accounting::Accounting;
use super::host::{Host, Tag};
use super::path::clean_path;

/// Result of resuming an operation once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Suspended at a checkpoint; resume later
    Yield,
    /// Nothing left to do for this operation
    Finished,
}

enum Phase {
    Start,
    Paths {
        stream: PathStream,
        last_yield: Instant,
    },
    Special {
        stream: SpecialStream,
    },
    Done,
}

/// Resumable run of one operation.
///
/// Path phase: suspends once `yield_interval` of work has passed since
/// the last suspension. Special phase: suspends after every item.
pub struct OperationRunner {
    operation: String,
    really_delete: bool,
    yield_interval: Duration,
    phase: Phase,
}

impl OperationRunner {
    pub fn new(
        operation: impl Into<String>,
        really_delete: bool,
        yield_interval: Duration,
    ) -> Self {
        Self {
            operation: operation.into(),
            really_delete,
            yield_interval,
            phase: Phase::Start,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Run until the next checkpoint or the end of the operation
    pub fn step<H: Host>(
        &mut self,
        registry: &mut BackendRegistry,
        host: &mut H,
        accounting: &mut Accounting,
    ) -> Step {
        loop {
            match &mut self.phase {
                Phase::Start => self.start(registry, host, accounting),
                Phase::Paths { stream, last_yield } => match stream.next() {
                    Some(Ok(path)) => {
                        let result = clean_path(&path, self.really_delete);
                        if let Err(e) = &result.outcome {
                            debug!("{}: {} {}", self.operation, e, path.display());
                        }
                        host.append_text(&result.line(), result.tag());
                        accounting.record_path(&result);

                        if last_yield.elapsed() >= self.yield_interval {
                            *last_yield = Instant::now();
                            return Step::Yield;
                        }
                    }
                    Some(Err(e)) => {
                        self.report_failure(&e, host, accounting);
                        self.enter_special(registry);
                    }
                    None => self.enter_special(registry),
                },
                Phase::Special { stream } => match stream.next() {
                    None | Some(Ok(SpecialResult::Stop)) => self.phase = Phase::Done,
                    Some(Err(e)) => {
                        self.report_failure(&e, host, accounting);
                        self.phase = Phase::Done;
                    }
                    Some(Ok(result)) => {
                        let line = self.special_line(result, accounting);
                        host.append_text(&line, None);
                        return Step::Yield;
                    }
                },
                Phase::Done => return Step::Finished,
            }
        }
    }

    fn start<H: Host>(
        &mut self,
        registry: &mut BackendRegistry,
        host: &mut H,
        accounting: &mut Accounting,
    ) {
        let Some(backend) = registry.get_mut(&self.operation) else {
            let line = format!("Unknown operation '{}'", self.operation);
            warn!("{}", line);
            host.append_text(&line, Some(Tag::Error));
            accounting.record_error();
            self.phase = Phase::Done;
            return;
        };

        if self.really_delete && backend.is_running() {
            let line = format!(
                "{} cannot be cleaned because it is currently running.  Close it, and try again.",
                backend.name()
            );
            warn!("{}", line);
            host.append_text(&line, Some(Tag::Error));
            accounting.record_error();
            self.phase = Phase::Done;
            return;
        }

        let options = host.operation_options(&self.operation);
        debug!(
            "clean_operation('{}'), options = {:?}",
            self.operation, options
        );
        for (option, enabled) in &options {
            backend.set_option(option, *enabled);
        }

        self.phase = Phase::Paths {
            stream: backend.list_paths(),
            last_yield: Instant::now(),
        };
    }

    fn enter_special(&mut self, registry: &mut BackendRegistry) {
        self.phase = match registry.get(&self.operation) {
            Some(backend) => Phase::Special {
                stream: backend.special_cleanup(self.really_delete),
            },
            None => Phase::Done,
        };
    }

    fn special_line(&self, result: SpecialResult, accounting: &mut Accounting) -> String {
        match result {
            SpecialResult::Freed { bytes, description } if self.really_delete => {
                accounting.record_special(bytes);
                format!("* {} {}", format_size(bytes), description)
            }
            SpecialResult::Freed { description, .. } | SpecialResult::Pending(description) => {
                format!("Special operation: {}", description)
            }
            SpecialResult::Stop => String::new(),
        }
    }

    fn report_failure<H: Host>(
        &self,
        error: &BackendError,
        host: &mut H,
        accounting: &mut Accounting,
    ) {
        let line = format!(
            "Exception while running operation '{}': '{}'",
            self.operation, error
        );
        warn!("{}", line);
        host.append_text(&line, Some(Tag::Error));
        accounting.record_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Lines(Vec<(String, Option<Tag>)>);

    impl Host for Lines {
        fn selected_operations(&self) -> Vec<String> {
            Vec::new()
        }

        fn operation_options(&self, _operation: &str) -> Vec<(String, bool)> {
            Vec::new()
        }

        fn append_text(&mut self, line: &str, tag: Option<Tag>) {
            self.0.push((line.to_string(), tag));
        }

        fn set_progress(&mut self, _fraction: f64, _label: &str) {}

        fn set_busy(&mut self, _busy: bool) {}
    }

    #[test]
    fn test_unregistered_operation_reports_and_finishes() {
        let mut registry = BackendRegistry::new();
        let mut host = Lines::default();
        let mut accounting = Accounting::new(true);
        let mut runner = OperationRunner::new("ghost", true, Duration::ZERO);

        assert_eq!(runner.step(&mut registry, &mut host, &mut accounting), Step::Finished);
        assert!(runner.is_done());
        assert_eq!(
            host.0,
            vec![("Unknown operation 'ghost'".to_string(), Some(Tag::Error))]
        );
        assert_eq!(accounting.state().errors, 1);
    }

    #[test]
    fn test_finished_runner_stays_finished() {
        let mut registry = BackendRegistry::new();
        let mut host = Lines::default();
        let mut accounting = Accounting::new(false);
        let mut runner = OperationRunner::new("ghost", false, Duration::ZERO);

        runner.step(&mut registry, &mut host, &mut accounting);
        assert_eq!(runner.step(&mut registry, &mut host, &mut accounting), Step::Finished);
        assert_eq!(host.0.len(), 1);
    }
}
