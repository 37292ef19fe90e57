//! Locating the governing `.namingrc.json` for a scan target
//!
//! Two search directions share the fixed config filename: scanning a single
//! file searches *upward* to the nearest ancestor config, scanning a
//! directory discovers configs *downward* with a first-found policy (never a
//! merge of several).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{is_ignored_folder, CONFIG_FILENAME};
use crate::error::ScanError;

/// Search upward from `start` for the nearest ancestor config file.
///
/// `start` may be a file or a directory; for a file the search begins in its
/// containing directory. The search stops at `root` without inspecting it:
/// when `start` already is `root` the answer is `None` straight away. A
/// missing `start` is a hard error.
pub fn find_config_file(start: &Path, root: &Path) -> Result<Option<PathBuf>, ScanError> {
    if !start.exists() {
        return Err(ScanError::NotFound {
            path: start.display().to_string(),
        });
    }

    let start = absolutize(start);
    let root = absolutize(root);

    let mut search = if start.is_dir() {
        start.clone()
    } else {
        start.parent().map(Path::to_path_buf).unwrap_or(start)
    };

    loop {
        if search == root {
            return Ok(None);
        }

        let candidate = search.join(CONFIG_FILENAME);
        if candidate.is_file() {
            debug!(config = %candidate.display(), "found ancestor config");
            return Ok(Some(candidate));
        }

        match search.parent() {
            Some(parent) => search = parent.to_path_buf(),
            None => return Ok(None),
        }
    }
}

/// Discover the authoritative config file for a directory subtree.
///
/// A config directly inside `start` wins without descending anywhere; only
/// in its absence are child directories searched depth-first (skipping the
/// ignored folder set), and the first config found anywhere stops the
/// search.
pub fn find_config_files(start: &Path) -> Result<Option<PathBuf>, ScanError> {
    if !start.exists() {
        return Err(ScanError::NotFound {
            path: start.display().to_string(),
        });
    }

    let candidate = start.join(CONFIG_FILENAME);
    if candidate.is_file() {
        debug!(config = %candidate.display(), "found config");
        return Ok(Some(candidate));
    }

    let mut subdirs: Vec<PathBuf> = read_dir_sorted(start)?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .map(|name| !is_ignored_folder(name))
                .unwrap_or(true)
        })
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        if let Some(found) = find_config_files(&subdir)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

pub(crate) fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::DirRead {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::DirRead {
            path: dir.display().to_string(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
