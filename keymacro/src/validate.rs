//! First pass: check a template against a keyword table

use crate::error::{ErrorSpan, SyntaxIssue, ValidationError, ValidationResult};
use crate::keywords::{KeywordId, KeywordTable, ModifierPolicy};
use crate::syntax::{scan, KeywordRef, Modifier, Token};
use crate::usage::{UsageProfile, UsageTracker};
use tracing::debug;

/// A keyword reference matched against a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub id: KeywordId,
    pub modifier: Option<Modifier>,
    pub span: ErrorSpan,
}

/// Look up a reference and check its modifier. Shared with the expander so
/// both passes accept exactly the same references.
pub(crate) fn resolve(table: &KeywordTable, kref: &KeywordRef<'_>) -> ValidationResult<Resolved> {
    let unknown = || ValidationError::UnknownKeyword {
        name: kref.name.to_string(),
        span: kref.span,
    };
    let id = table
        .lookup(kref.name)
        .and_then(|def| def.id)
        .ok_or_else(unknown)?;

    let modifier = match kref.modifier {
        None => None,
        Some(text) => {
            let parsed = match table.modifiers {
                ModifierPolicy::None => None,
                ModifierPolicy::ColumnWidth => Modifier::parse(text),
            };
            Some(parsed.ok_or(ValidationError::MalformedSyntax {
                issue: SyntaxIssue::InvalidModifier,
                span: kref.span,
            })?)
        }
    };

    Ok(Resolved {
        id,
        modifier,
        span: kref.span,
    })
}

/// Validate `template` against `table`.
///
/// Returns the usage profile of the template, or the first error found.
/// Syntax and unknown keywords are reported as they are scanned; usage
/// conflicts are checked after the scan, group vs. single-item usage first.
/// Environment references are only checked for syntax.
pub fn validate(template: &str, table: &KeywordTable) -> ValidationResult<UsageProfile> {
    debug!(context = %table.context, len = template.len(), "validating template");

    let result = scan_profile(template, table);
    match &result {
        Ok(profile) => debug!(?profile, "template is valid"),
        Err(err) => debug!(error = %err, "template rejected"),
    }
    result
}

fn scan_profile(template: &str, table: &KeywordTable) -> ValidationResult<UsageProfile> {
    let mut tracker = UsageTracker::default();
    for token in scan(template) {
        if let Token::Keyword(kref) = token? {
            let resolved = resolve(table, &kref)?;
            tracker.record(resolved.id.class(), resolved.span);
        }
    }
    tracker.finish()
}
