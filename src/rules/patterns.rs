//! Glob and content-pattern builders
//!
//! Globs use `globset` with literal separators, so `*` stays inside one path
//! segment and `**` crosses segments (matching zero or more of them). Content
//! patterns are case-insensitive `regex` matchers; iteration over every match
//! happens at the evaluation site.

use globset::GlobBuilder;
use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;

/// Test a forward-slash relative path against a single glob pattern
pub fn matches_glob(relative_path: &str, pattern: &str) -> Result<bool, ConfigError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ConfigError::Glob {
            pattern: pattern.to_string(),
            source,
        })?;

    Ok(glob.compile_matcher().is_match(relative_path))
}

/// Test a path against a comma-separated list of exclusion globs.
///
/// Whitespace around each glob is trimmed; any single match excludes.
pub fn excluded_by(relative_path: &str, excludes: &str) -> Result<bool, ConfigError> {
    for pattern in excludes.split(',') {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }
        if matches_glob(relative_path, pattern)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Build the matcher for a `tag` rule.
///
/// The alternation tries the balanced `<tag ...>...</tag>` form first so
/// well-formed pairs are preferred over matching just the opening tag; a bare
/// or self-closing `<tag ...>` still matches on its own.
pub fn tag_pattern(tag: &str) -> Result<Regex, ConfigError> {
    let tag = regex::escape(tag);
    let pattern = format!(r"<{tag}\b([^>]*)>([\s\S]*?)?</{tag}>|<{tag}\b([^>]*)>");
    content_pattern(&pattern)
}

/// Build the matcher for a `function` rule.
///
/// Matches any call whose name starts with the given prefix, not only exact
/// names, so one rule covers a whole family of related calls.
pub fn function_call_pattern(prefix: &str) -> Result<Regex, ConfigError> {
    let prefix = regex::escape(prefix);
    let pattern = format!(r"({prefix}\w*)\s*\(([^)]*)\)");
    content_pattern(&pattern)
}

/// Compile a content pattern, case-insensitive
pub fn content_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
