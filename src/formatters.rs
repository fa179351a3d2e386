//! Output formatters for validation reports
//!
//! Provides formatters that turn a diagnostic list into text or JSON.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::field::{Diagnostic, DiagnosticList, ErrorKind};

/// Which pipeline produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Create,
    Update,
    StatusUpdate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::StatusUpdate => write!(f, "status-update"),
        }
    }
}

/// A validation report for one Seed
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub seed: &'a str,
    pub source: &'a str,
    pub operation: Operation,
    pub valid: bool,
    pub diagnostics: &'a DiagnosticList,
}

impl<'a> Report<'a> {
    pub fn new(
        seed: &'a str,
        source: &'a str,
        operation: Operation,
        diagnostics: &'a DiagnosticList,
    ) -> Self {
        Self {
            seed,
            source,
            operation,
            valid: diagnostics.is_empty(),
            diagnostics,
        }
    }
}

/// Format a report as multi-line text output
pub fn format_text_report(report: &Report<'_>, show_bad_values: bool) -> String {
    let header = format!(
        "{} {} ({})",
        report.operation.to_string().bold(),
        report.seed.cyan(),
        report.source.dimmed()
    );

    if report.diagnostics.is_empty() {
        return format!("{} {} no problems found", header, "✓".green());
    }

    let mut output = vec![format!(
        "{} {} {} found",
        header,
        "✗".red(),
        pluralize(report.diagnostics.len(), "problem")
    )];
    for diagnostic in report.diagnostics {
        output.push(format_diagnostic(diagnostic, show_bad_values));
    }
    output.push(format_kind_counts(report.diagnostics).dimmed().to_string());

    output.join("\n")
}

/// Format a single diagnostic line
fn format_diagnostic(diagnostic: &Diagnostic, show_bad_values: bool) -> String {
    let kind = match diagnostic.kind {
        ErrorKind::Required => "Required".yellow(),
        ErrorKind::Invalid => "Invalid".red(),
        ErrorKind::Duplicate => "Duplicate".magenta(),
        ErrorKind::Immutable => "Immutable".blue(),
    };

    let mut line = format!("  {} {:<9} {}", "•".dimmed(), kind, diagnostic.field_path);
    if show_bad_values {
        if let Some(ref value) = diagnostic.bad_value {
            line.push_str(&format!(" {}", format!("{:?}", value).dimmed()));
        }
    }
    if !diagnostic.message.is_empty() {
        line.push_str(&format!(": {}", diagnostic.message));
    }
    line
}

/// Summary line with counts per kind, in taxonomy order
fn format_kind_counts(diagnostics: &DiagnosticList) -> String {
    let parts: Vec<String> = [
        ErrorKind::Required,
        ErrorKind::Invalid,
        ErrorKind::Duplicate,
        ErrorKind::Immutable,
    ]
    .iter()
    .filter_map(|kind| {
        let count = diagnostics.of_kind(*kind).count();
        (count > 0).then(|| format!("{:?}: {}", kind, count))
    })
    .collect();

    format!("  {}", parts.join(", "))
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Format a report as pretty JSON
pub fn format_json_report(report: &Report<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
