//! Error types for keyword macro validation and expansion
//!
//! Validation failures always point at a span of the template so the caller
//! can highlight the offending reference. Expansion failures carry a span when
//! they come from a specific reference (environment variables) and none when
//! they are about the output as a whole (buffer capacity).

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Result type for expansion
pub type ExpandResult<T> = std::result::Result<T, ExpandError>;

/// Half-open byte range `start..end` into a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorSpan {
    pub start: usize,
    pub end: usize,
}

impl ErrorSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The spanned slice of `template`, or an empty string if the span does
    /// not fall on character boundaries of this template.
    pub fn slice<'t>(&self, template: &'t str) -> &'t str {
        template.get(self.start..self.end).unwrap_or("")
    }

    /// Render `template` with a caret underline below the span.
    ///
    /// ```
    /// use keymacro::ErrorSpan;
    ///
    /// let rendered = ErrorSpan::new(4, 11).highlight("run $(Nope) now");
    /// assert_eq!(rendered, "run $(Nope) now\n    ^^^^^^^");
    /// ```
    pub fn highlight(&self, template: &str) -> String {
        let prefix = template.get(..self.start).unwrap_or(template);
        let indent = prefix.chars().count();
        let width = self.slice(template).chars().count().max(1);
        format!("{}\n{}{}", template, " ".repeat(indent), "^".repeat(width))
    }
}

impl fmt::Display for ErrorSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Flat error taxonomy shared by validation and expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownKeyword,
    MalformedSyntax,
    ConflictingUsage,
    ConflictingCompareType,
    BufferTooSmall,
    EnvVarNotFound,
    EnvVarTooLong,
}

/// What exactly is wrong with a malformed reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxIssue {
    /// `$(` without a closing `)`
    Unterminated,
    /// `$(` opened again before the previous reference was closed
    Nested,
    /// `$()` or `$(:modifier)`
    EmptyName,
    /// `$(Name:)`
    EmptyModifier,
    /// A modifier the keyword table does not accept
    InvalidModifier,
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyntaxIssue::Unterminated => "missing closing ')'",
            SyntaxIssue::Nested => "keyword references cannot be nested",
            SyntaxIssue::EmptyName => "keyword name is empty",
            SyntaxIssue::EmptyModifier => "modifier after ':' is empty",
            SyntaxIssue::InvalidModifier => "modifier is not supported here",
        };
        f.write_str(text)
    }
}

/// Template rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name is not in the keyword table for this context
    #[error("unknown keyword '{name}' at {span}")]
    UnknownKeyword { name: String, span: ErrorSpan },

    /// The reference delimiters or modifier are malformed
    #[error("malformed keyword reference at {span}: {issue}")]
    MalformedSyntax { issue: SyntaxIssue, span: ErrorSpan },

    /// Whole-selection keywords mixed with per-item keywords
    #[error(
        "keyword at {span} cannot be combined with keywords used earlier: \
         whole-selection and single-item keywords are mutually exclusive"
    )]
    ConflictingUsage { span: ErrorSpan },

    /// Different kinds of compare keywords mixed
    #[error("compare keyword at {span} does not match the compare keywords used earlier")]
    ConflictingCompareType { span: ErrorSpan },
}

impl ValidationError {
    pub fn span(&self) -> ErrorSpan {
        match self {
            ValidationError::UnknownKeyword { span, .. }
            | ValidationError::MalformedSyntax { span, .. }
            | ValidationError::ConflictingUsage { span }
            | ValidationError::ConflictingCompareType { span } => *span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::UnknownKeyword { .. } => ErrorKind::UnknownKeyword,
            ValidationError::MalformedSyntax { .. } => ErrorKind::MalformedSyntax,
            ValidationError::ConflictingUsage { .. } => ErrorKind::ConflictingUsage,
            ValidationError::ConflictingCompareType { .. } => ErrorKind::ConflictingCompareType,
        }
    }
}

/// Expansion failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// The template contains a reference that does not validate
    #[error(transparent)]
    Template(#[from] ValidationError),

    /// The output would not fit into the caller's buffer
    #[error("output needs at least {required} bytes but the buffer holds {capacity}")]
    BufferTooSmall { capacity: usize, required: usize },

    /// Environment variable is not set
    #[error("environment variable '{name}' at {span} is not defined")]
    EnvVarNotFound { name: String, span: ErrorSpan },

    /// Environment variable value exceeds the allowed length
    #[error("environment variable '{name}' at {span} is too long ({len} > {max} bytes)")]
    EnvVarTooLong {
        name: String,
        len: usize,
        max: usize,
        span: ErrorSpan,
    },
}

impl ExpandError {
    pub fn span(&self) -> Option<ErrorSpan> {
        match self {
            ExpandError::Template(err) => Some(err.span()),
            ExpandError::BufferTooSmall { .. } => None,
            ExpandError::EnvVarNotFound { span, .. } | ExpandError::EnvVarTooLong { span, .. } => {
                Some(*span)
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpandError::Template(err) => err.kind(),
            ExpandError::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            ExpandError::EnvVarNotFound { .. } => ErrorKind::EnvVarNotFound,
            ExpandError::EnvVarTooLong { .. } => ErrorKind::EnvVarTooLong,
        }
    }
}

/// Severity levels for error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// The caller may recover by substituting empty text and carrying on
    Warning,
    /// The template or call is rejected; the user has to fix something
    Error,
}

/// Trait for error types that have severity levels
pub trait Severity {
    fn severity(&self) -> ErrorSeverity;
}

impl Severity for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

impl Severity for ExpandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExpandError::EnvVarNotFound { .. } | ExpandError::EnvVarTooLong { .. } => {
                ErrorSeverity::Warning
            }
            ExpandError::Template(_) | ExpandError::BufferTooSmall { .. } => ErrorSeverity::Error,
        }
    }
}

/// Serializable summary of an error, used by front ends that print JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub span: Option<ErrorSpan>,
    pub message: String,
}

impl From<&ValidationError> for ErrorReport {
    fn from(err: &ValidationError) -> Self {
        Self {
            kind: err.kind(),
            severity: err.severity(),
            span: Some(err.span()),
            message: err.to_string(),
        }
    }
}

impl From<&ExpandError> for ErrorReport {
    fn from(err: &ExpandError) -> Self {
        Self {
            kind: err.kind(),
            severity: err.severity(),
            span: err.span(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slice_and_len() {
        let span = ErrorSpan::new(2, 8);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert_eq!(span.slice("a $(Foo) b"), "$(Foo)");
        assert_eq!(ErrorSpan::new(5, 50).slice("short"), "");
    }

    #[test]
    fn test_span_highlight_counts_characters() {
        let rendered = ErrorSpan::new(4, 9).highlight("äb $(Xy)");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "   ^^^^^");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::UnknownKeyword {
            name: "Bogus".into(),
            span: ErrorSpan::new(0, 8),
        };
        assert_eq!(err.to_string(), "unknown keyword 'Bogus' at 0..8");
        assert_eq!(err.kind(), ErrorKind::UnknownKeyword);
    }

    #[test]
    fn test_expand_error_span_and_kind() {
        let err = ExpandError::BufferTooSmall {
            capacity: 4,
            required: 5,
        };
        assert_eq!(err.span(), None);
        assert_eq!(err.kind(), ErrorKind::BufferTooSmall);

        let err = ExpandError::EnvVarNotFound {
            name: "HOME".into(),
            span: ErrorSpan::new(1, 7),
        };
        assert_eq!(err.span(), Some(ErrorSpan::new(1, 7)));
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_template_error_is_transparent() {
        let inner = ValidationError::MalformedSyntax {
            issue: SyntaxIssue::Unterminated,
            span: ErrorSpan::new(0, 3),
        };
        let err = ExpandError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.kind(), ErrorKind::MalformedSyntax);
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_report_from_expand_error() {
        let err = ExpandError::EnvVarTooLong {
            name: "PATH".into(),
            len: 10,
            max: 4,
            span: ErrorSpan::new(0, 6),
        };
        let report = ErrorReport::from(&err);
        assert_eq!(report.kind, ErrorKind::EnvVarTooLong);
        assert_eq!(report.span, Some(ErrorSpan::new(0, 6)));
        assert!(report.message.contains("PATH"));
    }
}
