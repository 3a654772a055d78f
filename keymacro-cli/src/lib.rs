//! Keymacro CLI library
//!
//! Command definitions and implementations behind the `keymacro` binary,
//! exposed so they can be driven from tests with in-memory writers.

/// Command-line definition
pub mod cli;
pub mod commands;
/// Directory listing for file-list templates
pub mod listing;

pub use cli::{Cli, Commands, ContextArg, ExpandArgs, OutputFormat, SideArg};
