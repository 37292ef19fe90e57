//! Report rendering for the terminal and for machine consumers

use colored::{ColoredString, Colorize};

use crate::error::NameLensError;
use crate::exit_codes;
use crate::rules::{Diagnostic, Severity};

/// Serialize diagnostics exactly as the core produces them
pub fn render_json(diagnostics: &[Diagnostic]) -> Result<String, NameLensError> {
    serde_json::to_string_pretty(diagnostics).map_err(Into::into)
}

/// Render a colorized problem list, one block per diagnostic
pub fn render_text(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();

    for diagnostic in diagnostics {
        let severity = diagnostic.severity;
        output.push_str(&format!(
            "{} {}\n",
            paint(severity, &format!("[{}]", diagnostic.nickname())).bold(),
            diagnostic.uri.white()
        ));

        if diagnostic.range.start.line > 0 {
            output.push_str(&format!(
                "  {} {}:{} to {}:{}\n",
                "at".dimmed(),
                diagnostic.range.start.line,
                diagnostic.range.start.column,
                diagnostic.range.end.line,
                diagnostic.range.end.column,
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            paint(severity, severity.label()),
            diagnostic.message
        ));

        if let Some(href) = &diagnostic.href {
            output.push_str(&format!("  {}\n", href.dimmed()));
        }

        output.push('\n');
    }

    output.push_str(&summary(diagnostics));
    output
}

/// Exit code for CI integration: errors beat warnings beat success
pub fn exit_code(diagnostics: &[Diagnostic]) -> i32 {
    if diagnostics
        .iter()
        .any(|diagnostic| diagnostic.severity == Severity::Error)
    {
        exit_codes::ERRORS
    } else if diagnostics
        .iter()
        .any(|diagnostic| diagnostic.severity == Severity::Warning)
    {
        exit_codes::WARNINGS
    } else {
        exit_codes::SUCCESS
    }
}

fn summary(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return format!("{}\n", "No naming convention violations found.".green());
    }

    let count = |severity: Severity| {
        diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    };

    format!(
        "{} {} ({} errors, {} warnings, {} information, {} hints)\n",
        "Found".bold(),
        format!("{} violations", diagnostics.len()).bold(),
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Information),
        count(Severity::Hint),
    )
}

fn paint(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Error => text.red(),
        Severity::Warning => text.yellow(),
        Severity::Information => text.blue(),
        Severity::Hint => text.dimmed(),
    }
}
