//! # Diagnostic Structures
//!
//! This module defines the data structures for reporting rule violations.
//!
//! ## Overview
//!
//! - [`Diagnostic`] - One reported violation with location and severity
//! - [`Range`] / [`Position`] - 1-based line/column span of a content match
//! - [`Resource`] - Whether the violation concerns a file or a folder
//!
//! A [`Diagnostic`] is a pure projection of one (rule, match) pair. Path-only
//! rules carry the default zero range; content rules fill in the range and the
//! matched text at the moment each match is found.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Rule, RuleKind, Severity};

/// A 1-based line/column pair. The default `0,0` marks "no textual position".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
}

/// The span of a content match, end position exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// First character of the match
    pub start: Position,
    /// One past the last character of the match
    pub end: Position,
}

/// What kind of filesystem entry a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// The diagnostic concerns a file
    File,
    /// The diagnostic concerns a folder
    Folder,
}

/// One reported rule violation.
///
/// Serializes to the editor-style problem shape: the originating rule is
/// embedded verbatim, `severity` is the 1-4 integer scheme, and `range` is
/// 1-based (or all zeroes for path-only rules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path of the offending file or folder
    pub uri: String,
    /// The rule that produced this diagnostic
    pub rule: Rule,
    /// The rule kind, duplicated for convenient filtering
    #[serde(rename = "type")]
    pub kind: String,
    /// Message inherited from the rule
    pub message: String,
    /// Severity inherited from the rule
    pub severity: Severity,
    /// Documentation link inherited from the rule
    pub href: Option<String>,
    /// Whether the violation concerns a file or a folder
    pub resource: Resource,
    /// Location of the match within the file, zero for path-only rules
    pub range: Range,
    /// The matched text for content rules, empty otherwise
    pub code: String,
    /// Human label inherited from the rule
    pub name: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic for `uri` with the rule's defaults
    pub fn new(uri: &Path, rule: &Rule) -> Self {
        Self {
            uri: uri.display().to_string(),
            kind: rule.kind.type_name().to_string(),
            message: rule.message.clone(),
            severity: rule.severity,
            href: rule.href.clone(),
            resource: Resource::File,
            range: Range::default(),
            code: String::new(),
            name: rule.name.clone(),
            rule: rule.clone(),
        }
    }

    /// Set the range of the content match
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Set the matched text
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Mark the diagnostic as concerning a folder
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = resource;
        self
    }

    /// Short label for the originating rule.
    ///
    /// The rule's `name` wins when present; kinds that carry a value fall
    /// back to `"<type> <value>"`, the rest to the bare type.
    pub fn nickname(&self) -> String {
        if let Some(name) = &self.name {
            if !name.is_empty() {
                return name.clone();
            }
        }

        match &self.rule.kind {
            RuleKind::Function(value) | RuleKind::Tag(value) | RuleKind::FilenamePostfix(value) => {
                format!("{} {}", self.kind, value)
            }
            _ => self.kind.clone(),
        }
    }
}
