//! Scanner module - scan entry points and the recursive directory walker
//!
//! The walker's only state is the `(config, diagnostics)` pair threaded
//! through recursive calls: each call receives the config to use, may load a
//! different one for its children, and returns the diagnostics it produced.
//! Accumulation is by return-value concatenation; on any error the scan
//! aborts and no diagnostics are returned.

use std::path::Path;

use tracing::{debug, info};

use crate::config::{self, find_config_file, Config, CONFIG_FILENAME};
use crate::error::{NameLensError, ScanError};
use crate::rules::{validate_rule, Diagnostic};

/// Audit a file or directory with configuration discovered from the tree.
///
/// A single file resolves its config by upward search towards the filesystem
/// root; a directory starts from an empty rule set and picks up configs while
/// walking downward. A missing target is a hard error.
pub async fn scan(path: &Path) -> Result<Vec<Diagnostic>, NameLensError> {
    if !path.exists() {
        return Err(ScanError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    if path.is_dir() {
        let diagnostics = scan_folder(path, Config::empty(path))?;
        info!(count = diagnostics.len(), "scan complete");
        return Ok(diagnostics);
    }

    let config = match find_config_file(path, Path::new("/"))? {
        Some(config_path) => Config::load(&config_path)?,
        None => Config::empty(path.parent().unwrap_or_else(|| Path::new(""))),
    };
    scan_file(path, &config)
}

/// Evaluate every rule in `config` against a single file
pub fn scan_file(path: &Path, config: &Config) -> Result<Vec<Diagnostic>, NameLensError> {
    evaluate_rules(path, config)
}

/// Recursively walk a directory, evaluating every rule against every file
/// and folder entry.
///
/// A config file directly inside `dir` replaces the incoming config for this
/// subtree and all of its descendants; rule sets override, they never merge.
/// Folder entries are rule-evaluated before being descended into, so
/// `folder_not_allowed` rules see the directory itself.
pub fn scan_folder(dir: &Path, config: Config) -> Result<Vec<Diagnostic>, NameLensError> {
    let config_path = dir.join(CONFIG_FILENAME);
    let config = if config_path.is_file() {
        debug!(config = %config_path.display(), "switching to nested config");
        Config::load_with_root(&config_path, dir)?
    } else {
        config
    };

    let mut diagnostics = Vec::new();
    for path in config::resolver::read_dir_sorted(dir)? {
        if path.is_dir() {
            let ignored = path
                .file_name()
                .map(config::is_ignored_folder)
                .unwrap_or(false);
            if ignored {
                continue;
            }

            diagnostics.extend(evaluate_rules(&path, &config)?);
            diagnostics.extend(scan_folder(&path, config.clone())?);
        } else {
            diagnostics.extend(evaluate_rules(&path, &config)?);
        }
    }

    Ok(diagnostics)
}

fn evaluate_rules(path: &Path, config: &Config) -> Result<Vec<Diagnostic>, NameLensError> {
    let mut diagnostics = Vec::new();
    for rule in &config.rules {
        diagnostics.extend(validate_rule(path, rule, config)?);
    }
    Ok(diagnostics)
}
