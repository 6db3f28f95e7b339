use std::time::Duration;

use log::info;

use crate::backend::BackendRegistry;
use crate::error::{Result, ScourError};
use crate::size::{format_size, progress_fraction};

use super::accounting::{Accounting, RunState};
use super::host::Host;
use super::operation::{OperationRunner, Step};

/// Driver configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Wall-clock work between suspensions while cleaning paths
    pub yield_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            yield_interval: Duration::from_millis(250),
        }
    }
}

/// What one resumption of the worker produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// More work remains
    Working,
    /// The run is complete; the host is interactive again
    Done,
}

/// Runs the selected operations as a resumable sequence of ticks.
///
/// Each call to `next` does a bounded slice of work and returns
/// `Tick::Working`, until a final `Tick::Done`; after that it returns
/// `None`. Dropping the worker between ticks abandons the run.
pub struct Worker<H: Host> {
    host: H,
    registry: BackendRegistry,
    operations: Vec<String>,
    really_delete: bool,
    config: WorkerConfig,
    accounting: Accounting,
    runner: Option<OperationRunner>,
    next_operation: usize,
    exhausted: bool,
}

impl<H: Host> Worker<H> {
    pub fn new(host: H, registry: BackendRegistry, really_delete: bool) -> Result<Self> {
        Self::with_config(host, registry, really_delete, WorkerConfig::default())
    }

    /// Fails before touching the host if nothing is selected or a
    /// selected operation has no backend.
    pub fn with_config(
        mut host: H,
        registry: BackendRegistry,
        really_delete: bool,
        config: WorkerConfig,
    ) -> Result<Self> {
        let operations = host.selected_operations();
        if operations.is_empty() {
            return Err(ScourError::NoOperationSelected);
        }
        if let Some(unknown) = operations.iter().find(|op| !registry.contains(op)) {
            return Err(ScourError::UnknownOperation(unknown.clone()));
        }

        host.set_busy(true);
        host.clear_text();

        let mut accounting = Accounting::new(really_delete);
        accounting.state_mut().operation_count = operations.len();

        Ok(Self {
            host,
            registry,
            operations,
            really_delete,
            config,
            accounting,
            runner: None,
            next_operation: 0,
            exhausted: false,
        })
    }

    /// Register the total-size callback; it is called with 0 right away
    pub fn set_total_size_callback(&mut self, cb: impl FnMut(u64) + 'static) {
        self.accounting.set_callback(Box::new(cb));
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    pub fn really_delete(&self) -> bool {
        self.really_delete
    }

    pub fn state(&self) -> &RunState {
        self.accounting.state()
    }

    /// Bytes freed so far (always 0 in preview)
    pub fn total_bytes(&self) -> u64 {
        self.accounting.state().total_bytes
    }

    /// Bytes a preview found to be cleanable
    pub fn reclaimable_bytes(&self) -> u64 {
        self.accounting.state().reclaimable_bytes
    }

    pub fn is_finished(&self) -> bool {
        self.accounting.state().finished
    }

    fn begin_operation(&mut self) -> OperationRunner {
        let index = self.next_operation;
        let operation = &self.operations[index];
        let label = if self.really_delete {
            format!("Please wait.  Scanning and deleting: {}", operation)
        } else {
            format!("Please wait.  Scanning: {}", operation)
        };

        self.host
            .set_progress(progress_fraction(index, self.operations.len()), &label);
        self.accounting.state_mut().operation_index = index;

        OperationRunner::new(
            operation.clone(),
            self.really_delete,
            self.config.yield_interval,
        )
    }

    fn finish(&mut self) {
        let state = self.accounting.state();
        let summary = if self.really_delete {
            state.total_bytes
        } else {
            state.reclaimable_bytes
        };
        info!(
            "run finished: {} operations, {} paths, {} errors, {} bytes freed",
            state.operation_count, state.paths_cleaned, state.errors, state.total_bytes
        );

        self.host.set_progress(1.0, "Done.");
        self.host
            .append_text(&format!("Total size: {}", format_size(summary)), None);
        self.host.set_busy(false);
        self.accounting.state_mut().finished = true;
    }
}

impl<H: Host> Iterator for Worker<H> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.exhausted {
            return None;
        }

        loop {
            if self.runner.is_none() {
                if self.next_operation >= self.operations.len() {
                    self.finish();
                    self.exhausted = true;
                    return Some(Tick::Done);
                }
                self.runner = Some(self.begin_operation());
            }

            let Some(runner) = self.runner.as_mut() else {
                continue;
            };
            match runner.step(&mut self.registry, &mut self.host, &mut self.accounting) {
                Step::Yield => return Some(Tick::Working),
                Step::Finished => {
                    self.runner = None;
                    self.next_operation += 1;
                }
            }
        }
    }
}
