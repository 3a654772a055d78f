//! Subcommand implementations.
//!
//! Every command writes its regular output to `out` and human-readable
//! diagnostics to `err`, and returns the process exit code.

pub mod expand;
pub mod keywords;
pub mod list;
pub mod validate;

use std::io::Write;

use anyhow::Result;
use keymacro::{ErrorReport, ErrorSeverity};

use crate::cli::OutputFormat;

/// Print an engine error.
///
/// Structured formats go to `out` so scripts can parse them; text goes to
/// `err` with the offending reference underlined.
pub(crate) fn report_error(
    template: &str,
    report: &ErrorReport,
    format: OutputFormat,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(report)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml_ng::to_string(report)?)?,
        OutputFormat::Text => {
            let label = match report.severity {
                ErrorSeverity::Warning => "warning",
                ErrorSeverity::Error => "error",
            };
            writeln!(err, "{}: {}", label, report.message)?;
            if let Some(span) = report.span {
                writeln!(err, "{}", span.highlight(template))?;
            }
        }
    }
    Ok(())
}
