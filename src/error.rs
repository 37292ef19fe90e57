//! Error types for NameLens
//!
//! This module defines custom error types using `thiserror` for better error
//! handling and more descriptive error messages throughout the application.

use thiserror::Error;

/// Main error type for NameLens
#[derive(Error, Debug)]
pub enum NameLensError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scan-related errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Report serialization errors
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors caused by a broken or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A rule without an `includes` glob is a systemic configuration defect
    /// and aborts the run instead of being skipped per file.
    #[error("Rule '{rule}' must have a glob pattern in the `includes` field")]
    MissingIncludes {
        /// Name or kind of the offending rule
        rule: String,
    },

    /// Failed to read a config file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the config file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse a config file as JSON
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        /// Path to the config file
        path: String,
        /// The underlying JSON error
        source: serde_json::Error,
    },

    /// A rule carries an invalid glob in `includes` or `excludes`
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Glob {
        /// The offending glob pattern
        pattern: String,
        /// The underlying glob error
        source: globset::Error,
    },

    /// A content rule carries an invalid regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern source
        pattern: String,
        /// The underlying regex error
        source: regex::Error,
    },
}

/// Errors that occur while scanning the file tree
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan target or search start does not exist
    #[error("Scan target not found: {path}")]
    NotFound {
        /// The missing path
        path: String,
    },

    /// Failed to read a file evaluated by a content rule
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to enumerate a directory
    #[error("Failed to read directory '{path}': {source}")]
    DirRead {
        /// Path to the directory that failed to enumerate
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}
