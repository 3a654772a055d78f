//! Entry points bound to a fixed keyword table, one pair per call site

use crate::buffer::{ColumnWidths, OutputBuffer, Placements};
use crate::context::ExpansionContext;
use crate::error::{ExpandResult, ValidationResult};
use crate::expand::{expand, ExpandOptions, ExpandSinks, ExpansionOutcome};
use crate::keywords::{
    KeywordTable, ARGUMENTS, COMMAND, HOT_PATH, INFO_LINE, INIT_DIR, MAKE_FILE_LIST,
    USER_MENU_ARGUMENTS,
};
use crate::usage::UsageProfile;
use crate::validate::validate;

pub fn validate_user_menu_arguments(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &USER_MENU_ARGUMENTS)
}

pub fn validate_command(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &COMMAND)
}

pub fn validate_hot_path(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &HOT_PATH)
}

pub fn validate_arguments(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &ARGUMENTS)
}

pub fn validate_info_line(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &INFO_LINE)
}

pub fn validate_make_file_list(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &MAKE_FILE_LIST)
}

pub fn validate_init_dir(template: &str) -> ValidationResult<UsageProfile> {
    validate(template, &INIT_DIR)
}

fn expand_plain(
    template: &str,
    table: &KeywordTable,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
) -> ExpandResult<ExpansionOutcome> {
    expand(template, table, context, out, options, ExpandSinks::default())
}

pub fn expand_user_menu_arguments(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
) -> ExpandResult<ExpansionOutcome> {
    expand_plain(template, &USER_MENU_ARGUMENTS, context, out, options)
}

pub fn expand_command(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
) -> ExpandResult<ExpansionOutcome> {
    expand_plain(template, &COMMAND, context, out, options)
}

pub fn expand_hot_path(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
) -> ExpandResult<ExpansionOutcome> {
    expand_plain(template, &HOT_PATH, context, out, options)
}

pub fn expand_arguments(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
) -> ExpandResult<ExpansionOutcome> {
    expand_plain(template, &ARGUMENTS, context, out, options)
}

pub fn expand_init_dir(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
) -> ExpandResult<ExpansionOutcome> {
    expand_plain(template, &INIT_DIR, context, out, options)
}

/// Expand an info-line template, recording where each value landed
pub fn expand_info_line(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
    placements: Option<&mut Placements>,
) -> ExpandResult<ExpansionOutcome> {
    let sinks = ExpandSinks {
        column_widths: None,
        placements,
    };
    expand(template, &INFO_LINE, context, out, options, sinks)
}

/// Expand one line of a generated file list.
///
/// Run once per item with `detect_max_var_sizes` set to collect the widest
/// value of each column, then again without it to emit aligned `:max`
/// columns.
pub fn expand_make_file_list(
    template: &str,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
    column_widths: Option<&mut ColumnWidths>,
) -> ExpandResult<ExpansionOutcome> {
    let sinks = ExpandSinks {
        column_widths,
        placements: None,
    };
    expand(template, &MAKE_FILE_LIST, context, out, options, sinks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CurrentItem;
    use crate::error::ValidationError;

    #[test]
    fn test_each_context_uses_its_own_table() {
        assert!(validate_init_dir("$(FullPath)").is_ok());
        assert!(matches!(
            validate_init_dir("$(Name)"),
            Err(ValidationError::UnknownKeyword { .. })
        ));
        assert!(validate_hot_path("$(AppDir)\\tools").is_ok());
        assert!(validate_command("$(FullName)").is_err());
        assert!(validate_info_line("$(FileAttributes)").is_ok());
        assert!(validate_make_file_list("$(FilePath)").is_ok());
        assert!(validate_arguments("$(DOSName)").is_ok());
        assert!(validate_user_menu_arguments("$(FullPathLeft)").is_ok());
    }

    #[test]
    fn test_expand_arguments() {
        let ctx = ExpansionContext::new().with_current(CurrentItem::new("/src/main.rs"));
        let mut out = OutputBuffer::new(64);
        let outcome =
            expand_arguments("-o $(NamePart).o", &ctx, &mut out, &ExpandOptions::default())
                .unwrap();
        assert_eq!(out.as_str(), "-o main.o");
        assert!(outcome.file_name_used);
    }
}
