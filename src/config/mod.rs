//! Configuration module
//!
//! A [`Config`] is a rule set plus the `scan_root` its glob patterns are
//! evaluated relative to. Rule sets come from `.namingrc.json` files; the
//! `scan_root` is always injected by whichever component resolved the config,
//! never by the file itself.

pub mod resolver;

pub use resolver::{find_config_file, find_config_files};

use serde::Deserialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::rules::Rule;

/// Fixed name of the configuration file looked up in each directory
pub const CONFIG_FILENAME: &str = ".namingrc.json";

/// Folder names never descended into and never rule-evaluated
pub const IGNORED_FOLDERS: &[&str] = &[".git", ".svn", ".hg", "node_modules"];

/// Whether a folder name is in the fixed exclusion set
pub(crate) fn is_ignored_folder(name: &OsStr) -> bool {
    IGNORED_FOLDERS.iter().any(|ignored| name == *ignored)
}

/// On-disk shape of `.namingrc.json`
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

/// A resolved rule set.
///
/// Invariant: `scan_root` must be an ancestor of every path the config is
/// applied to, or glob matching silently fails to match.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Absolute root that rule globs are evaluated relative to
    pub scan_root: PathBuf,
    /// The rules, in declaration order
    pub rules: Vec<Rule>,
}

impl Config {
    /// A config with no rules, rooted at `scan_root`
    pub fn empty(scan_root: impl Into<PathBuf>) -> Self {
        Self {
            scan_root: scan_root.into(),
            rules: Vec::new(),
        }
    }

    /// Load a config file; `scan_root` becomes the file's directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let scan_root = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        Self::load_with_root(path, scan_root)
    }

    /// Load a config file with an explicitly chosen `scan_root`
    pub fn load_with_root(path: &Path, scan_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self {
            scan_root: scan_root.into(),
            rules: file.rules,
        })
    }
}
