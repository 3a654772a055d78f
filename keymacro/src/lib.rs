//! Keyword macro engine for file manager command templates
//!
//! User-configurable commands (user-menu actions, hot paths, info line,
//! generated file lists, initial directories) are written as templates that
//! mix literal text with `$(Keyword)` and `%ENVVAR%` references. This crate
//! validates such templates against the keyword table of their context and
//! expands them against a snapshot of the caller's state.
//!
//! # Two passes
//!
//! ```
//! use keymacro::contexts::{expand_user_menu_arguments, validate_user_menu_arguments};
//! use keymacro::{CurrentItem, ExpandOptions, ExpansionContext, OutputBuffer};
//!
//! let template = "notepad $(FullName)";
//! let profile = validate_user_menu_arguments(template)?;
//! assert!(profile.must_handle_one_by_one);
//!
//! let ctx = ExpansionContext::new().with_current(CurrentItem::new("C:\\docs\\todo.txt"));
//! let mut out = OutputBuffer::new(260);
//! expand_user_menu_arguments(template, &ctx, &mut out, &ExpandOptions::default())?;
//! assert_eq!(out.as_str(), "notepad C:\\docs\\todo.txt");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Validation reports the first problem with a byte span into the template,
//! which front ends can underline with [`ErrorSpan::highlight`]. The engine
//! itself never prints; it only logs through `tracing`.

/// Bounded output buffer, placements and column width aggregate
pub mod buffer;
/// Caller state available to templates
pub mod context;
/// Per-context validate/expand entry points
pub mod contexts;
/// Error types and severity classification
pub mod error;
/// Second pass
pub mod expand;
/// Menu insertion planner
pub mod insert;
/// Keyword tables per template context
pub mod keywords;
/// File name and path splitting
pub mod names;
/// Template tokenizer
pub mod syntax;
/// Usage profile
pub mod usage;
/// First pass
pub mod validate;

pub use buffer::{ColumnWidths, OutputBuffer, Placement, Placements};
pub use context::{
    ComparePair, CurrentItem, Environment, ExpansionContext, FileAttributes, ListingItem,
    MapEnvironment, PanelPaths, PanelSide, ProcessEnvironment, SelectionList,
};
pub use error::{
    ErrorKind, ErrorReport, ErrorSeverity, ErrorSpan, ExpandError, ExpandResult, Severity,
    SyntaxIssue, ValidationError, ValidationResult,
};
pub use expand::{expand, ExpandOptions, ExpandSinks, ExpansionOutcome};
pub use insert::{plan_insertion, Insertion};
pub use keywords::{
    InsertFlag, InsertFlags, KeywordClass, KeywordDefinition, KeywordId, KeywordTable,
    TableEntry, TemplateContext,
};
pub use usage::{CompareType, UsageProfile};
pub use validate::validate;
