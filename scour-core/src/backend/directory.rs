use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use jwalk::{DirEntryIter, WalkDir};
use log::warn;

use super::process::is_process_running;
use super::vacuum::VacuumStream;
use super::{CleaningBackend, PathStream, SpecialStream};
use crate::config::CleanerDef;
use crate::error::BackendError;

/// Expand a leading `~` to the user's home directory
pub fn expand_home(pattern: &str) -> String {
    if pattern == "~" || pattern.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.to_string_lossy(), &pattern[1..]);
        }
    }
    pattern.to_string()
}

/// Backend built from a [`CleanerDef`]: cleans the files matched by the
/// enabled options' path patterns and vacuums their databases.
pub struct DirectoryBackend {
    def: CleanerDef,
    enabled: HashMap<String, bool>,
    probe: fn(&[String]) -> bool,
}

impl DirectoryBackend {
    pub fn new(def: CleanerDef) -> Self {
        let enabled = def
            .options
            .iter()
            .map(|o| (o.id.clone(), o.default))
            .collect();
        Self {
            def,
            enabled,
            probe: is_process_running,
        }
    }

    /// Replace the running-process check
    pub fn with_probe(mut self, probe: fn(&[String]) -> bool) -> Self {
        self.probe = probe;
        self
    }

    pub fn definition(&self) -> &CleanerDef {
        &self.def
    }

    pub fn is_enabled(&self, option: &str) -> bool {
        self.enabled.get(option).copied().unwrap_or(false)
    }

    fn enabled_options(&self) -> impl Iterator<Item = &crate::config::OptionDef> {
        self.def.options.iter().filter(|o| self.is_enabled(&o.id))
    }
}

impl CleaningBackend for DirectoryBackend {
    fn id(&self) -> &str {
        &self.def.id
    }

    fn name(&self) -> &str {
        &self.def.name
    }

    fn is_running(&self) -> bool {
        (self.probe)(&self.def.running)
    }

    fn set_option(&mut self, option: &str, enabled: bool) {
        match self.enabled.get_mut(option) {
            Some(slot) => *slot = enabled,
            None => warn!("{}: ignoring unknown option '{}'", self.def.id, option),
        }
    }

    fn list_paths(&self) -> PathStream {
        let patterns = self
            .enabled_options()
            .flat_map(|o| o.paths.iter().map(move |p| (p.clone(), o.remove_dirs)))
            .collect();
        Box::new(PatternWalk::new(patterns))
    }

    fn special_cleanup(&self, really_delete: bool) -> SpecialStream {
        let patterns = self
            .enabled_options()
            .flat_map(|o| o.vacuum.iter().cloned())
            .collect();
        Box::new(VacuumStream::new(patterns, really_delete))
    }
}

/// Expands glob patterns one at a time and walks each match.
struct PatternWalk {
    patterns: VecDeque<(String, bool)>,
    matches: VecDeque<PathBuf>,
    remove_dirs: bool,
    current: Option<TreeWalk>,
}

impl PatternWalk {
    fn new(patterns: VecDeque<(String, bool)>) -> Self {
        Self {
            patterns,
            matches: VecDeque::new(),
            remove_dirs: false,
            current: None,
        }
    }
}

impl Iterator for PatternWalk {
    type Item = Result<PathBuf, BackendError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(walk) = &mut self.current {
                match walk.next() {
                    Some(path) => return Some(Ok(path)),
                    None => self.current = None,
                }
            }

            if let Some(root) = self.matches.pop_front() {
                match std::fs::symlink_metadata(&root) {
                    Ok(meta) if meta.is_dir() => {
                        self.current = Some(TreeWalk::new(root, self.remove_dirs));
                    }
                    Ok(_) => return Some(Ok(root)),
                    // Vanished between expansion and walk
                    Err(_) => {}
                }
                continue;
            }

            let (pattern, remove_dirs) = self.patterns.pop_front()?;
            let expanded = expand_home(&pattern);
            let paths = match glob::glob(&expanded) {
                Ok(paths) => paths,
                Err(e) => {
                    return Some(Err(BackendError::Pattern {
                        pattern,
                        message: e.to_string(),
                    }));
                }
            };
            for entry in paths {
                match entry {
                    Ok(path) => self.matches.push_back(path),
                    Err(e) => warn!("skipping unreadable match of '{}': {}", pattern, e),
                }
            }
            self.remove_dirs = remove_dirs;
        }
    }
}

/// Lazily walks one directory: files and symlinks first, in sorted
/// order, then (if requested) the directories below the root with
/// children before their parents.
struct TreeWalk {
    root: PathBuf,
    entries: DirEntryIter<((), ())>,
    include_dirs: bool,
    dirs: Vec<PathBuf>,
}

impl TreeWalk {
    fn new(root: PathBuf, include_dirs: bool) -> Self {
        let entries = WalkDir::new(&root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .into_iter();
        Self {
            root,
            entries,
            include_dirs,
            dirs: Vec::new(),
        }
    }

    fn is_root(&self, path: &Path) -> bool {
        path == self.root
    }
}

impl Iterator for TreeWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        while let Some(entry) = self.entries.next() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if self.is_root(&path) {
                continue;
            }

            if entry.file_type().is_dir() {
                if self.include_dirs {
                    self.dirs.push(path);
                }
                continue;
            }

            return Some(path);
        }

        // Pre-order discovery, so popping yields descendants first
        self.dirs.pop()
    }
}
