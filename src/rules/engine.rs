//! Per-file rule evaluation
//!
//! [`validate_rule`] turns one rule and one path into zero or more
//! diagnostics. Path applicability is decided against the path relative to
//! `config.scan_root`, normalized to forward slashes; content rules then read
//! the file and report every non-overlapping match, not just the first, so a
//! single pass surfaces the complete violation set.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::trace;

use super::patterns;
use super::position;
use super::results::{Diagnostic, Range, Resource};
use super::{Rule, RuleKind};
use crate::config::Config;
use crate::error::{ConfigError, NameLensError, ScanError};

/// Evaluate one rule against one path.
///
/// Returns empty when the rule does not apply (includes miss or excludes
/// hit); a rule without `includes` is a hard
/// [`ConfigError`](crate::error::ConfigError) that aborts the run.
pub fn validate_rule(
    path: &Path,
    rule: &Rule,
    config: &Config,
) -> Result<Vec<Diagnostic>, NameLensError> {
    let includes = rule
        .includes
        .as_deref()
        .ok_or_else(|| ConfigError::MissingIncludes {
            rule: rule.label().to_string(),
        })?;

    let relative_path = relative_to_root(path, &config.scan_root);

    if !patterns::matches_glob(&relative_path, includes)? {
        return Ok(Vec::new());
    }
    if let Some(excludes) = rule.excludes.as_deref() {
        if patterns::excluded_by(&relative_path, excludes)? {
            return Ok(Vec::new());
        }
    }

    trace!(path = %relative_path, rule = rule.label(), "rule applies");

    let diagnostics = match &rule.kind {
        RuleKind::ExtensionNotAllowed => vec![Diagnostic::new(path, rule)],
        RuleKind::FolderNotAllowed => {
            vec![Diagnostic::new(path, rule).with_resource(Resource::Folder)]
        }
        RuleKind::FilenamePostfix(postfixes) => check_postfix(path, rule, postfixes),
        RuleKind::Regex(pattern) => {
            let pattern = patterns::content_pattern(pattern)?;
            content_matches(path, rule, &pattern)?
        }
        RuleKind::Tag(tag) => {
            let pattern = patterns::tag_pattern(tag)?;
            content_matches(path, rule, &pattern)?
        }
        RuleKind::Function(prefix) => {
            let pattern = patterns::function_call_pattern(prefix)?;
            content_matches(path, rule, &pattern)?
        }
        // Kinds from newer versions fall through with no diagnostics.
        RuleKind::Unknown(_) => Vec::new(),
    };

    Ok(diagnostics)
}

/// Require the file's base name (extension stripped) to end with one of the
/// comma-separated postfixes; any one match suppresses the diagnostic.
fn check_postfix(path: &Path, rule: &Rule, postfixes: &str) -> Vec<Diagnostic> {
    let base_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    let candidates: Vec<&str> = postfixes
        .split(',')
        .map(str::trim)
        .filter(|postfix| !postfix.is_empty())
        .collect();

    // An empty postfix list accepts every name.
    let accepted = candidates.is_empty()
        || candidates
            .iter()
            .any(|postfix| base_name.ends_with(postfix));

    if accepted {
        Vec::new()
    } else {
        vec![Diagnostic::new(path, rule)]
    }
}

/// Read the file and emit one diagnostic per non-overlapping match, with the
/// exact line/column range and the matched text as `code`.
fn content_matches(
    path: &Path,
    rule: &Rule,
    pattern: &Regex,
) -> Result<Vec<Diagnostic>, NameLensError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::FileRead {
        path: path.display().to_string(),
        source,
    })?;

    let mut diagnostics = Vec::new();
    for found in pattern.find_iter(&content) {
        let range = Range {
            start: position::line_column(&content, found.start()),
            end: position::line_column(&content, found.end()),
        };
        diagnostics.push(
            Diagnostic::new(path, rule)
                .with_range(range)
                .with_code(found.as_str()),
        );
    }

    Ok(diagnostics)
}

/// Path relative to the scan root, forward slashes regardless of host
/// separator. When the root is not an ancestor the absolute path comes back
/// unchanged, which then fails to match relative globs.
fn relative_to_root(path: &Path, root: &Path) -> String {
    let absolute = absolutize(path);
    let absolute_root = absolutize(root);

    let relative = absolute.strip_prefix(&absolute_root).unwrap_or(&absolute);
    relative.to_string_lossy().replace('\\', "/")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::results::Position;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn rule(json: &str) -> Rule {
        serde_json::from_str(json).unwrap()
    }

    fn config(scan_root: &Path) -> Config {
        Config::empty(scan_root)
    }

    #[test]
    fn test_missing_includes_is_a_config_error() {
        let rule = rule(
            r#"{
                "type": "tag",
                "value": "style",
                "severity": 1,
                "message": "CSS in cfm"
            }"#,
        );

        let result = validate_rule(
            Path::new("/project/bad.cfm"),
            &rule,
            &config(Path::new("/project")),
        );
        assert!(matches!(
            result,
            Err(NameLensError::Config(ConfigError::MissingIncludes { .. }))
        ));
    }

    #[test]
    fn test_extension_not_allowed_respects_excludes() {
        let rule = rule(
            r#"{
                "type": "extension_not_allowed",
                "includes": "webroot/**/*.md",
                "excludes": "**/readme.ignore.md",
                "severity": 1,
                "message": "Markdown files not allowed under webroot.",
                "href": "https://example.com/ourdocs.html"
            }"#,
        );
        let config = config(Path::new("/project"));

        let flagged =
            validate_rule(Path::new("/project/webroot/readme.md"), &rule, &config).unwrap();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].resource, Resource::File);
        assert_eq!(flagged[0].range, Range::default());

        let ignored = validate_rule(
            Path::new("/project/webroot/readme.ignore.md"),
            &rule,
            &config,
        )
        .unwrap();
        assert!(ignored.is_empty());

        let outside = validate_rule(Path::new("/project/docs/readme.md"), &rule, &config).unwrap();
        assert!(outside.is_empty());
    }

    #[test]
    fn test_folder_not_allowed_marks_resource() {
        let rule = rule(
            r#"{
                "type": "folder_not_allowed",
                "includes": "webroot/**/tests",
                "severity": 1,
                "message": "Test folders are not allowed under the webroot."
            }"#,
        );
        let config = config(Path::new("/project"));

        let flagged = validate_rule(Path::new("/project/webroot/tests"), &rule, &config).unwrap();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].resource, Resource::Folder);

        let nested = validate_rule(
            Path::new("/project/webroot/nested/tests"),
            &rule,
            &config,
        )
        .unwrap();
        assert_eq!(nested.len(), 1);

        let clean = validate_rule(Path::new("/project/webroot/nottest"), &rule, &config).unwrap();
        assert!(clean.is_empty());
    }

    #[test]
    fn test_filename_postfix_with_alternatives() {
        let rule = rule(
            r#"{
                "type": "filename_postfix",
                "excludes": "webroot/tests/**/Ignoreme.cfc,webroot/tests/**/Application.cfc",
                "includes": "webroot/tests/**/*.cfc",
                "value": "Test,Spec",
                "severity": 3,
                "message": "Unit tests should end with <SomeComponent>Test.cfc",
                "href": "https://example.com/noTests.html",
                "name": "TestFile"
            }"#,
        );
        let config = config(Path::new("/project"));
        let check = |file: &str| {
            validate_rule(
                &Path::new("/project/webroot/tests").join(file),
                &rule,
                &config,
            )
            .unwrap()
        };

        assert!(check("Application.cfc").is_empty());
        assert!(check("Ignoreme.cfc").is_empty());
        assert!(check("GoodTest.cfc").is_empty());
        assert!(check("GoodSpec.cfc").is_empty());

        let flagged = check("TestBad.cfc");
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].name.as_deref(), Some("TestFile"));
        assert_eq!(flagged[0].nickname(), "TestFile");
    }

    #[test]
    fn test_filename_postfix_empty_value_accepts_everything() {
        let rule = rule(
            r#"{
                "type": "filename_postfix",
                "includes": "**/*.cfc",
                "value": "",
                "severity": 1,
                "message": "Postfix required."
            }"#,
        );

        let diagnostics = validate_rule(
            Path::new("/project/Anything.cfc"),
            &rule,
            &config(Path::new("/project")),
        )
        .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_tag_rule_reports_exact_positions() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.cfm");
        // <style> opens line 3; </style> ends line 5 at column 9 (exclusive).
        let content = "line one\n<p>ok</p>\n<style>\n.a { color: red; }\n</style>\ntail\n";
        fs::write(&file, content).unwrap();

        let rule = rule(
            r#"{
                "type": "tag",
                "includes": "**/*.cfm",
                "value": "style",
                "severity": 1,
                "message": "CSS in cfm",
                "href": "https://example.com/ourdocs.html"
            }"#,
        );

        let diagnostics = validate_rule(&file, &rule, &config(dir.path())).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, Position { line: 3, column: 1 });
        assert_eq!(diagnostics[0].range.end, Position { line: 5, column: 9 });
        assert!(diagnostics[0].code.starts_with("<style>"));
        assert!(diagnostics[0].code.ends_with("</style>"));
    }

    #[test]
    fn test_function_rule_reports_exact_positions() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.cfm");
        fs::write(&file, "x\n\tdump(myvariable12)\n").unwrap();

        let rule = rule(
            r#"{
                "type": "function",
                "includes": "**/*.cfm",
                "value": "dump",
                "severity": 1,
                "message": "dump in cfm"
            }"#,
        );

        let diagnostics = validate_rule(&file, &rule, &config(dir.path())).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, Position { line: 2, column: 2 });
        assert_eq!(diagnostics[0].range.end, Position { line: 2, column: 20 });
        assert_eq!(diagnostics[0].code, "dump(myvariable12)");
    }

    #[test]
    fn test_regex_rule_reports_every_match() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("multimatch.cfm");
        let block = "<cfoutput>#value#</cfoutput>\n";
        fs::write(&file, block.repeat(6)).unwrap();

        let rule = rule(
            r#"{
                "type": "regex",
                "includes": "**/*.cfm",
                "value": "<cfoutput[^>]*>[^<]*</cfoutput>",
                "severity": 1,
                "message": "No output in CFM files.",
                "name": "NoOutputInCFM"
            }"#,
        );

        let diagnostics = validate_rule(&file, &rule, &config(dir.path())).unwrap();
        assert_eq!(diagnostics.len(), 6);
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            assert_eq!(diagnostic.range.start.line as usize, index + 1);
            assert_eq!(diagnostic.code, "<cfoutput>#value#</cfoutput>");
        }
    }

    #[test]
    fn test_regex_rule_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.cfm");
        fs::write(&file, "QueryExecute(sql)\nqueryexecute(sql)\n").unwrap();

        let rule = rule(
            r#"{
                "type": "regex",
                "includes": "**/*.cfm",
                "value": "queryexecute",
                "severity": 1,
                "message": "No inline queries."
            }"#,
        );

        let diagnostics = validate_rule(&file, &rule, &config(dir.path())).unwrap();
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_invalid_regex_propagates() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.cfm");
        fs::write(&file, "content").unwrap();

        let rule = rule(
            r#"{
                "type": "regex",
                "includes": "**/*.cfm",
                "value": "[unclosed",
                "severity": 1,
                "message": "Broken rule."
            }"#,
        );

        let result = validate_rule(&file, &rule, &config(dir.path()));
        assert!(matches!(
            result,
            Err(NameLensError::Config(ConfigError::Pattern { .. }))
        ));
    }

    #[test]
    fn test_unreadable_file_propagates() {
        let dir = TempDir::new().unwrap();
        let rule = rule(
            r#"{
                "type": "tag",
                "includes": "**/*.cfm",
                "value": "style",
                "severity": 1,
                "message": "CSS in cfm"
            }"#,
        );

        let result = validate_rule(&dir.path().join("absent.cfm"), &rule, &config(dir.path()));
        assert!(matches!(
            result,
            Err(NameLensError::Scan(ScanError::FileRead { .. }))
        ));
    }

    #[test]
    fn test_unknown_kind_yields_nothing() {
        let rule = rule(
            r#"{
                "type": "line_length",
                "includes": "**/*",
                "value": "120",
                "severity": 2,
                "message": "Lines should be short."
            }"#,
        );

        let diagnostics = validate_rule(
            Path::new("/project/any.cfm"),
            &rule,
            &config(Path::new("/project")),
        )
        .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_scan_root_outside_path_never_matches() {
        let rule = rule(
            r#"{
                "type": "extension_not_allowed",
                "includes": "webroot/**/*.md",
                "severity": 1,
                "message": "Markdown files not allowed under webroot."
            }"#,
        );

        // scan_root is not an ancestor, so the relative glob cannot match.
        let diagnostics = validate_rule(
            Path::new("/project/webroot/readme.md"),
            &rule,
            &config(Path::new("/elsewhere")),
        )
        .unwrap();
        assert!(diagnostics.is_empty());
    }
}
