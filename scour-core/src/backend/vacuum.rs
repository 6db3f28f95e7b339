use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rusqlite::Connection;

use super::SpecialResult;
use super::directory::expand_home;
use crate::error::BackendError;

/// Compacts every SQLite database matched by the patterns, one per step.
pub(super) struct VacuumStream {
    patterns: VecDeque<String>,
    databases: VecDeque<PathBuf>,
    really_delete: bool,
}

impl VacuumStream {
    pub(super) fn new(patterns: VecDeque<String>, really_delete: bool) -> Self {
        Self {
            patterns,
            databases: VecDeque::new(),
            really_delete,
        }
    }
}

impl Iterator for VacuumStream {
    type Item = Result<SpecialResult, BackendError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(path) = self.databases.pop_front() {
                let description = format!("Vacuum {}", path.display());
                if !self.really_delete {
                    return Some(Ok(SpecialResult::Pending(description)));
                }
                let freed = vacuum(&path).map(|bytes| SpecialResult::Freed { bytes, description });
                return Some(freed);
            }

            let pattern = self.patterns.pop_front()?;
            let paths = match glob::glob(&expand_home(&pattern)) {
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
                    Ok(path) if path.is_file() => self.databases.push_back(path),
                    Ok(_) => {}
                    Err(e) => warn!("skipping unreadable match of '{}': {}", pattern, e),
                }
            }
        }
    }
}

/// Run VACUUM on one database, returning the bytes reclaimed
fn vacuum(path: &Path) -> Result<u64, BackendError> {
    let size = |path: &Path| {
        fs::metadata(path)
            .map(|m| m.len())
            .map_err(|source| BackendError::Io {
                path: path.to_path_buf(),
                source,
            })
    };

    let before = size(path)?;
    let database_error = |e: rusqlite::Error| BackendError::Database {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let conn = Connection::open(path).map_err(database_error)?;
    conn.execute("VACUUM", []).map_err(database_error)?;
    drop(conn);
    let after = size(path)?;

    debug!("vacuumed {}: {} -> {} bytes", path.display(), before, after);
    Ok(before.saturating_sub(after))
}
