//! Rule model and evaluation
//!
//! A [`Rule`] is one named check with a glob applicability filter and a
//! kind-specific matcher. Rules are declared in `.namingrc.json` files and
//! evaluated by [`engine::validate_rule`].

pub mod engine;
pub mod patterns;
pub mod position;
pub mod results;

pub use engine::validate_rule;
pub use results::{Diagnostic, Position, Range, Resource};

use serde::{Deserialize, Serialize};

/// Severity levels for diagnostics, mirroring the four-level editor scheme.
///
/// Severities are serialized as the integers 1-4; the presentation layer is
/// responsible for any zero-based shifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    /// Something not allowed by the rules
    Error,
    /// Something suspicious but allowed
    Warning,
    /// Something to inform about but not a problem
    Information,
    /// A hint towards a better way of doing it
    Hint,
}

impl Severity {
    /// Human-readable label used by report rendering
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Information => "Information",
            Severity::Hint => "Hint",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Information),
            4 => Ok(Severity::Hint),
            other => Err(format!("severity must be between 1 and 4, got {}", other)),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }
}

/// The closed set of rule kinds, each carrying only the value it needs.
///
/// Kinds this version does not know about deserialize to [`RuleKind::Unknown`]
/// and evaluate to no diagnostics, so configs written for newer versions keep
/// working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Flag every file matched by `includes`
    ExtensionNotAllowed,
    /// Flag every folder matched by `includes`
    FolderNotAllowed,
    /// Require the file's base name to end with one of the comma-separated
    /// postfixes
    FilenamePostfix(String),
    /// Flag every match of a regular expression in the file content
    Regex(String),
    /// Flag every `<tag ...>...</tag>` pair or bare `<tag ...>` in the file
    /// content
    Tag(String),
    /// Flag every call to a function whose name starts with the given prefix
    Function(String),
    /// An unrecognized kind, preserved verbatim for round-tripping
    Unknown(String),
}

impl RuleKind {
    /// The wire name of the kind, as it appears in `.namingrc.json`
    pub fn type_name(&self) -> &str {
        match self {
            RuleKind::ExtensionNotAllowed => "extension_not_allowed",
            RuleKind::FolderNotAllowed => "folder_not_allowed",
            RuleKind::FilenamePostfix(_) => "filename_postfix",
            RuleKind::Regex(_) => "regex",
            RuleKind::Tag(_) => "tag",
            RuleKind::Function(_) => "function",
            RuleKind::Unknown(kind) => kind,
        }
    }

    /// The kind-specific value, if the kind carries one
    pub fn value(&self) -> Option<&str> {
        match self {
            RuleKind::FilenamePostfix(value)
            | RuleKind::Regex(value)
            | RuleKind::Tag(value)
            | RuleKind::Function(value) => Some(value),
            _ => None,
        }
    }
}

/// One naming-convention check.
///
/// `includes` is required: evaluating a rule without it is a
/// [`ConfigError`](crate::error::ConfigError), not a skip. `excludes` is an
/// optional comma-separated list of globs; any single match suppresses the
/// rule for that path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRule", into = "RawRule")]
pub struct Rule {
    /// What the rule checks for
    pub kind: RuleKind,
    /// Glob the path must match for the rule to apply
    pub includes: Option<String>,
    /// Comma-separated globs that suppress the rule
    pub excludes: Option<String>,
    /// Severity of the resulting diagnostics
    pub severity: Severity,
    /// Message attached to the resulting diagnostics
    pub message: String,
    /// Documentation link explaining the convention
    pub href: Option<String>,
    /// Optional human label, used as the diagnostic nickname
    pub name: Option<String>,
}

impl Rule {
    /// The label used when reporting errors about the rule itself
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind.type_name())
    }
}

/// Wire form of a rule as it appears in `.namingrc.json`.
///
/// The tag/value pair is folded into [`RuleKind`] on the way in so dispatch
/// stays exhaustive; a missing `value` becomes the empty string, matching the
/// reference behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    includes: Option<String>,
    #[serde(default)]
    excludes: Option<String>,
    severity: Severity,
    #[serde(default)]
    message: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        let value = raw.value.unwrap_or_default();
        let kind = match raw.kind.as_str() {
            "extension_not_allowed" => RuleKind::ExtensionNotAllowed,
            "folder_not_allowed" => RuleKind::FolderNotAllowed,
            "filename_postfix" => RuleKind::FilenamePostfix(value),
            "regex" => RuleKind::Regex(value),
            "tag" => RuleKind::Tag(value),
            "function" => RuleKind::Function(value),
            _ => RuleKind::Unknown(raw.kind),
        };

        Rule {
            kind,
            includes: raw.includes,
            excludes: raw.excludes,
            severity: raw.severity,
            message: raw.message,
            href: raw.href,
            name: raw.name,
        }
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let kind = rule.kind.type_name().to_string();
        let value = rule.kind.value().map(str::to_string);

        RawRule {
            kind,
            value,
            includes: rule.includes,
            excludes: rule.excludes,
            severity: rule.severity,
            message: rule.message,
            href: rule.href,
            name: rule.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rule_deserializes_known_kinds() {
        let json = r#"{
            "type": "filename_postfix",
            "includes": "webroot/tests/**/*.cfc",
            "excludes": "webroot/tests/**/Application.cfc",
            "value": "Test,Spec",
            "severity": 3,
            "message": "Unit tests should end with <SomeComponent>Test.cfc",
            "href": "https://example.com/conventions.html",
            "name": "TestFile"
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind, RuleKind::FilenamePostfix("Test,Spec".to_string()));
        assert_eq!(rule.includes.as_deref(), Some("webroot/tests/**/*.cfc"));
        assert_eq!(rule.severity, Severity::Information);
        assert_eq!(rule.name.as_deref(), Some("TestFile"));
    }

    #[test]
    fn test_rule_deserializes_path_kinds_with_unused_value() {
        // Configs in the wild carry a value for path-only kinds; it is ignored.
        let json = r#"{
            "type": "extension_not_allowed",
            "includes": "webroot/**/*.md",
            "value": "*.md",
            "severity": 1,
            "message": "Markdown files not allowed under webroot."
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind, RuleKind::ExtensionNotAllowed);
        assert_eq!(rule.kind.value(), None);
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let json = r#"{
            "type": "line_length",
            "includes": "**/*.cfm",
            "value": "120",
            "severity": 2,
            "message": "Lines should be short."
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind, RuleKind::Unknown("line_length".to_string()));
        assert_eq!(rule.kind.type_name(), "line_length");
    }

    #[test]
    fn test_missing_includes_parses_but_is_caught_at_evaluation() {
        let json = r#"{
            "type": "tag",
            "value": "style",
            "severity": 1,
            "message": "CSS in cfm"
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.includes.is_none());
    }

    #[test]
    fn test_severity_out_of_range_is_rejected() {
        let json = r#"{
            "type": "tag",
            "includes": "**/*.cfm",
            "value": "style",
            "severity": 5,
            "message": "CSS in cfm"
        }"#;

        assert!(serde_json::from_str::<Rule>(json).is_err());
    }

    #[test]
    fn test_severity_serializes_as_integer() {
        let value = serde_json::to_value(Severity::Hint).unwrap();
        assert_eq!(value, serde_json::json!(4));
    }

    #[test]
    fn test_rule_round_trips_through_wire_form() {
        let json = r#"{
            "type": "function",
            "includes": "**/*.cfm",
            "value": "dump",
            "severity": 1,
            "message": "dump in cfm"
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        let serialized = serde_json::to_value(&rule).unwrap();
        assert_eq!(serialized["type"], "function");
        assert_eq!(serialized["value"], "dump");
        assert_eq!(serialized["severity"], 1);
    }

    #[test]
    fn test_rule_label_prefers_name() {
        let json = r#"{
            "type": "tag",
            "includes": "**/*.cfm",
            "value": "style",
            "severity": 1,
            "message": "CSS in cfm",
            "name": "NoInlineCss"
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.label(), "NoInlineCss");

        let unnamed = Rule {
            name: None,
            ..rule
        };
        assert_eq!(unnamed.label(), "tag");
    }
}
