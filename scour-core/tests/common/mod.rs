#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use scour_core::{
    BackendError, CleaningBackend, Host, PathStream, SpecialResult, SpecialStream, Tag,
};

/// Host that records every call
#[derive(Default)]
pub struct RecordingHost {
    pub selected: Vec<String>,
    pub options: HashMap<String, Vec<(String, bool)>>,
    pub lines: Vec<(String, Option<Tag>)>,
    pub progress: Vec<(f64, String)>,
    pub busy: Vec<bool>,
    pub cleared: usize,
}

impl RecordingHost {
    pub fn selecting(ops: &[&str]) -> Self {
        Self {
            selected: ops.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn error_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(_, tag)| *tag == Some(Tag::Error))
            .map(|(line, _)| line.as_str())
            .collect()
    }

    pub fn plain_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(_, tag)| tag.is_none())
            .map(|(line, _)| line.as_str())
            .collect()
    }

    pub fn untouched(&self) -> bool {
        self.lines.is_empty()
            && self.progress.is_empty()
            && self.busy.is_empty()
            && self.cleared == 0
    }
}

impl Host for RecordingHost {
    fn selected_operations(&self) -> Vec<String> {
        self.selected.clone()
    }

    fn operation_options(&self, operation: &str) -> Vec<(String, bool)> {
        self.options.get(operation).cloned().unwrap_or_default()
    }

    fn append_text(&mut self, line: &str, tag: Option<Tag>) {
        self.lines.push((line.to_string(), tag));
    }

    fn set_progress(&mut self, fraction: f64, label: &str) {
        self.progress.push((fraction, label.to_string()));
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy.push(busy);
    }

    fn clear_text(&mut self) {
        self.cleared += 1;
    }
}

/// Backend replaying fixed path and special-result sequences
pub struct ScriptedBackend {
    pub id: String,
    pub name: String,
    pub running: bool,
    pub paths: Vec<Result<PathBuf, String>>,
    pub specials: Vec<Result<SpecialResult, String>>,
    pub options_seen: Rc<RefCell<Vec<(String, bool)>>>,
    pub list_calls: Rc<Cell<usize>>,
    /// Time taken to produce each path
    pub path_delay: Duration,
}

impl ScriptedBackend {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_uppercase(),
            running: false,
            paths: Vec::new(),
            specials: Vec::new(),
            options_seen: Rc::default(),
            list_calls: Rc::default(),
            path_delay: Duration::ZERO,
        }
    }

    pub fn with_paths(mut self, paths: Vec<Result<PathBuf, String>>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_specials(mut self, specials: Vec<Result<SpecialResult, String>>) -> Self {
        self.specials = specials;
        self
    }

    pub fn with_path_delay(mut self, delay: Duration) -> Self {
        self.path_delay = delay;
        self
    }

    pub fn running(mut self) -> Self {
        self.running = true;
        self
    }
}

impl CleaningBackend for ScriptedBackend {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_option(&mut self, option: &str, enabled: bool) {
        self.options_seen
            .borrow_mut()
            .push((option.to_string(), enabled));
    }

    fn list_paths(&self) -> PathStream {
        self.list_calls.set(self.list_calls.get() + 1);
        let delay = self.path_delay;
        Box::new(self.paths.clone().into_iter().map(move |r| {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            r.map_err(BackendError::Failed)
        }))
    }

    fn special_cleanup(&self, _really_delete: bool) -> SpecialStream {
        Box::new(
            self.specials
                .clone()
                .into_iter()
                .map(|r| r.map_err(BackendError::Failed)),
        )
    }
}
