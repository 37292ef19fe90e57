//! NameLens Library
//!
//! This crate provides the core functionality for auditing a project's file
//! layout and file contents against declarative naming-convention rules
//! discovered from `.namingrc.json` files.

pub mod cli;
pub mod config;
pub mod error;
pub mod rules;
pub mod scanner;

pub use config::{find_config_file, find_config_files, Config};
pub use error::NameLensError;
pub use rules::{validate_rule, Diagnostic, Rule, RuleKind, Severity};
pub use scanner::{scan, scan_file, scan_folder};

/// Exit codes for the CLI
pub mod exit_codes {
    /// Success - no diagnostics reported
    pub const SUCCESS: i32 = 0;
    /// Error-severity diagnostics reported
    pub const ERRORS: i32 = 1;
    /// Warning-severity diagnostics reported, nothing worse
    pub const WARNINGS: i32 = 2;
    /// Configuration or runtime error
    pub const RUNTIME_ERROR: i32 = 3;
}
