use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use crate::error::PathError;
use crate::size::format_size;

use super::host::Tag;

/// What happened to one path
#[derive(Debug)]
pub struct PathResult {
    pub path: PathBuf,
    /// Size measured before any deletion (0 if measuring failed)
    pub size: u64,
    pub outcome: Result<(), PathError>,
}

impl PathResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Bytes this path contributes to a total
    pub fn counted_bytes(&self) -> u64 {
        if self.is_success() { self.size } else { 0 }
    }

    /// Log line: `<size> <path>` or `<message> <path>`
    pub fn line(&self) -> String {
        match &self.outcome {
            Ok(()) => format!("{} {}", format_size(self.size), self.path.display()),
            Err(e) => format!("{} {}", e, self.path.display()),
        }
    }

    pub fn tag(&self) -> Option<Tag> {
        match self.outcome {
            Ok(()) => None,
            Err(_) => Some(Tag::Error),
        }
    }
}

/// Measure a path and, when `really_delete`, remove it.
///
/// Symlinks are measured and removed themselves, never followed.
/// Directories are removed only when empty.
pub fn clean_path(path: &Path, really_delete: bool) -> PathResult {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return PathResult {
                path: path.to_path_buf(),
                size: 0,
                outcome: Err(PathError::Measure(e)),
            };
        }
    };

    let size = metadata.len();
    let outcome = if really_delete {
        delete(path, &metadata).map_err(PathError::Delete)
    } else {
        Ok(())
    };

    PathResult {
        path: path.to_path_buf(),
        size,
        outcome,
    }
}

fn delete(path: &Path, metadata: &Metadata) -> std::io::Result<()> {
    if metadata.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}
