//! # CLI Module
//!
//! This module defines the command-line interface for NameLens using `clap`.
//!
//! The CLI is a thin layer over the core API: it resolves the scan target,
//! runs [`scan`](crate::scanner::scan), and renders the diagnostics either as
//! a colorized problem list or as pretty-printed JSON for machine consumers.
//!
//! ```bash
//! # Audit a folder against the configs discovered in its tree
//! namelens webroot/
//!
//! # Audit a single file, resolving the nearest ancestor config
//! namelens webroot/views/home.cfm
//!
//! # Machine output for CI
//! namelens webroot/ --json
//! ```

pub mod output;

use clap::Parser;
use std::path::PathBuf;

/// NameLens - audit file and folder naming conventions against declarative rules
#[derive(Parser, Debug)]
#[command(name = "namelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File or folder to scan
    pub path: PathBuf,

    /// Emit diagnostics as pretty-printed JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
