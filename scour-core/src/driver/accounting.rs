use log::debug;

use super::path::PathResult;

/// Invoked with the cumulative bytes freed
pub type TotalSizeCallback = Box<dyn FnMut(u64)>;

/// Counters of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Bytes actually freed; never moves in preview mode
    pub total_bytes: u64,
    /// Bytes a preview found that deleting would free
    pub reclaimable_bytes: u64,
    /// Index of the operation being run
    pub operation_index: usize,
    pub operation_count: usize,
    pub paths_cleaned: u64,
    pub errors: u64,
    pub finished: bool,
}

/// Owns the run counters and notifies the total-size callback.
pub struct Accounting {
    state: RunState,
    really_delete: bool,
    on_total: Option<TotalSizeCallback>,
}

impl Accounting {
    pub fn new(really_delete: bool) -> Self {
        Self {
            state: RunState::default(),
            really_delete,
            on_total: None,
        }
    }

    pub fn really_delete(&self) -> bool {
        self.really_delete
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    /// Register the callback and report the current total to it
    pub fn set_callback(&mut self, mut cb: TotalSizeCallback) {
        cb(self.state.total_bytes);
        self.on_total = Some(cb);
    }

    pub fn record_path(&mut self, result: &PathResult) {
        if !result.is_success() {
            self.state.errors += 1;
            return;
        }
        self.state.paths_cleaned += 1;
        if self.really_delete {
            self.add_freed(result.size);
        } else {
            self.state.reclaimable_bytes += result.size;
        }
    }

    /// Bytes freed by a special cleanup step; ignored in preview
    pub fn record_special(&mut self, bytes: u64) {
        if self.really_delete {
            self.add_freed(bytes);
        } else {
            debug!("preview special result of {} bytes not counted", bytes);
        }
    }

    pub fn record_error(&mut self) {
        self.state.errors += 1;
    }

    fn add_freed(&mut self, bytes: u64) {
        self.state.total_bytes += bytes;
        if let Some(cb) = self.on_total.as_mut() {
            cb(self.state.total_bytes);
        }
    }
}
