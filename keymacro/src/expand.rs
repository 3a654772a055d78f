//! Second pass: substitute references into a bounded output buffer
//!
//! The expander scans the template with the same scanner and resolves
//! references with the same lookup as the validator, so a template that
//! validated never fails here with a template error. What can still fail is
//! the environment (missing or oversized variables) and the output capacity.

use crate::buffer::{ColumnWidths, OutputBuffer, Placement, Placements};
use crate::context::{ComparePair, ExpansionContext};
use crate::error::{ExpandError, ExpandResult};
use crate::keywords::{
    CompareKind, ComparePairing, CompareRef, CompareSide, KeywordClass, KeywordId, KeywordTable,
};
use crate::names;
use crate::syntax::{scan, EnvRef, Modifier, Token};
use crate::validate::resolve;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Longest environment variable value accepted by default
pub const DEFAULT_ENV_VALUE_MAX_LEN: usize = 32767;
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Per-call switches for the expander
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Substitute empty text for missing or oversized environment variables
    pub ignore_env_var_not_found_or_too_long: bool,
    /// Record every column's width into the aggregate and skip padding
    pub detect_max_var_sizes: bool,
    pub env_value_max_len: usize,
    /// chrono format string for `$(FileDate)`
    pub date_format: String,
    /// chrono format string for `$(FileTime)`
    pub time_format: String,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            ignore_env_var_not_found_or_too_long: false,
            detect_max_var_sizes: false,
            env_value_max_len: DEFAULT_ENV_VALUE_MAX_LEN,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// Optional side channels filled during expansion
#[derive(Debug, Default)]
pub struct ExpandSinks<'s> {
    pub column_widths: Option<&'s mut ColumnWidths>,
    pub placements: Option<&'s mut Placements>,
}

/// Result of a successful expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpansionOutcome {
    /// Bytes written to the output buffer
    pub written: usize,
    /// A value taken from the file context (current item, selection, panels,
    /// compare pair or listing) was substituted
    pub file_name_used: bool,
}

/// Expand `template` into `out`.
///
/// The buffer is cleared first and is left empty on any error. Placements,
/// when given, are cleared and refilled; column widths are only ever raised.
pub fn expand(
    template: &str,
    table: &KeywordTable,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
    sinks: ExpandSinks<'_>,
) -> ExpandResult<ExpansionOutcome> {
    tracing::debug!(
        context = %table.context,
        capacity = out.capacity(),
        "expanding template"
    );

    out.clear();
    let result = expand_into(template, table, context, out, options, sinks);
    match &result {
        Ok(outcome) => tracing::debug!(?outcome, "expansion finished"),
        Err(err) => {
            out.clear();
            tracing::debug!(error = %err, "expansion failed");
        }
    }
    result
}

fn expand_into(
    template: &str,
    table: &KeywordTable,
    context: &ExpansionContext,
    out: &mut OutputBuffer,
    options: &ExpandOptions,
    sinks: ExpandSinks<'_>,
) -> ExpandResult<ExpansionOutcome> {
    let ExpandSinks {
        mut column_widths,
        mut placements,
    } = sinks;
    if let Some(placements) = placements.as_deref_mut() {
        placements.clear();
    }

    let mut file_name_used = false;
    let mut column = 0usize;

    for token in scan(template) {
        match token? {
            Token::Literal(text) => out.push_str(text)?,
            Token::EnvVar(env) => {
                let value = env_value(&env, context, options)?;
                out.push_str(&value)?;
            }
            Token::Keyword(kref) => {
                let resolved = resolve(table, &kref)?;
                let value = keyword_value(resolved.id, context, options);
                tracing::trace!("Resolved '{}' to '{}'", kref.name, value);

                if resolved.id.class().uses_file_context() {
                    file_name_used = true;
                }

                let width = value.chars().count();
                let pad_to = if options.detect_max_var_sizes {
                    if let Some(widths) = column_widths.as_deref_mut() {
                        widths.record(column, width);
                    }
                    None
                } else {
                    match resolved.modifier {
                        Some(Modifier::Max) => column_widths
                            .as_deref_mut()
                            .and_then(|widths| widths.record(column, width)),
                        Some(Modifier::Width(fixed)) => Some(fixed),
                        None => None,
                    }
                };
                column += 1;

                let position = out.len();
                let right_align = resolved.id == KeywordId::FileSize;
                write_padded(out, &value, width, pad_to, right_align)?;

                if let Some(placements) = placements.as_deref_mut() {
                    placements.push(Placement {
                        position,
                        length: out.len() - position,
                    });
                }
            }
        }
    }

    Ok(ExpansionOutcome {
        written: out.len(),
        file_name_used,
    })
}

fn write_padded(
    out: &mut OutputBuffer,
    value: &str,
    width: usize,
    pad_to: Option<usize>,
    right_align: bool,
) -> ExpandResult<()> {
    let fill = pad_to.map_or(0, |target| target.saturating_sub(width));
    if right_align {
        out.push_padding(fill)?;
        out.push_str(value)
    } else {
        out.push_str(value)?;
        out.push_padding(fill)
    }
}

fn env_value(
    env: &EnvRef<'_>,
    context: &ExpansionContext,
    options: &ExpandOptions,
) -> ExpandResult<String> {
    let err = match context.env_var(env.name) {
        Some(value) if value.len() <= options.env_value_max_len => return Ok(value),
        Some(value) => ExpandError::EnvVarTooLong {
            name: env.name.to_string(),
            len: value.len(),
            max: options.env_value_max_len,
            span: env.span,
        },
        None => ExpandError::EnvVarNotFound {
            name: env.name.to_string(),
            span: env.span,
        },
    };

    if options.ignore_env_var_not_found_or_too_long {
        tracing::warn!("{}; substituting empty text", err);
        Ok(String::new())
    } else {
        Err(err)
    }
}

fn keyword_value<'c>(
    id: KeywordId,
    context: &'c ExpansionContext,
    options: &ExpandOptions,
) -> Cow<'c, str> {
    match id.class() {
        KeywordClass::PerItem | KeywordClass::ItemLocation => {
            Cow::Borrowed(current_item_value(id, context))
        }
        KeywordClass::Selection { full_names: false } => {
            Cow::Borrowed(context.selected_names.as_str())
        }
        KeywordClass::Selection { full_names: true } => {
            Cow::Borrowed(context.selected_full_names.as_str())
        }
        KeywordClass::PanelPath(panel) => Cow::Borrowed(context.panels.path(panel).unwrap_or("")),
        KeywordClass::Compare(compare) => {
            Cow::Borrowed(compare_value(compare, context.compare.as_ref()))
        }
        KeywordClass::Program => Cow::Borrowed(&context.app_dir),
        KeywordClass::Listing => listing_value(id, context, options),
    }
}

fn current_item_value(id: KeywordId, context: &ExpansionContext) -> &str {
    let Some(current) = context.current.as_ref() else {
        return "";
    };
    let long = current.full_name.as_str();
    let dos = current.dos_or_long();

    match id {
        KeywordId::FullName => long,
        KeywordId::Name => names::file_name(long),
        KeywordId::NamePart => names::split_ext(names::file_name(long)).0,
        KeywordId::ExtPart => names::split_ext(names::file_name(long)).1,
        KeywordId::FullPath => names::dir_with_separator(long),
        KeywordId::Drive => names::drive(long),
        KeywordId::DosFullName => dos,
        KeywordId::DosName => names::file_name(dos),
        KeywordId::DosNamePart => names::split_ext(names::file_name(dos)).0,
        KeywordId::DosExtPart => names::split_ext(names::file_name(dos)).1,
        KeywordId::DosFullPath => names::dir_with_separator(dos),
        // other classes are dispatched before reaching here
        _ => "",
    }
}

fn compare_value(compare: CompareRef, pair: Option<&ComparePair>) -> &str {
    let Some(pair) = pair else {
        return "";
    };
    let applies = match compare.kind {
        CompareKind::File => !pair.are_dirs,
        CompareKind::Dir => pair.are_dirs,
        CompareKind::FileOrDir => true,
    };
    if !applies {
        return "";
    }

    let (left, right) = if pair.reversed {
        (pair.second.as_str(), pair.first.as_str())
    } else {
        (pair.first.as_str(), pair.second.as_str())
    };
    match (compare.pairing, compare.side) {
        (ComparePairing::LeftRight, CompareSide::First) => left,
        (ComparePairing::LeftRight, CompareSide::Second) => right,
        (ComparePairing::ActiveInactive, CompareSide::First) => pair.first.as_str(),
        (ComparePairing::ActiveInactive, CompareSide::Second) => pair.second.as_str(),
    }
}

fn format_time(time: Option<NaiveDateTime>, format: &str) -> String {
    let mut text = String::new();
    if let Some(time) = time {
        // chrono reports bad format strings through fmt::Error
        if write!(text, "{}", time.format(format)).is_err() {
            tracing::debug!("Invalid date/time format '{}'", format);
            text.clear();
        }
    }
    text
}

fn listing_value<'c>(
    id: KeywordId,
    context: &'c ExpansionContext,
    options: &ExpandOptions,
) -> Cow<'c, str> {
    let Some(item) = context.listing.as_ref() else {
        return Cow::Borrowed("");
    };
    let dir = context.listing_dir.as_deref().unwrap_or("");

    match id {
        KeywordId::FileName => Cow::Borrowed(&item.name),
        KeywordId::FileNamePart => Cow::Borrowed(names::split_ext(&item.name).0),
        KeywordId::FileExtPart => Cow::Borrowed(names::split_ext(&item.name).1),
        KeywordId::DosFileName if item.is_disk => {
            Cow::Borrowed(item.dos_name.as_deref().unwrap_or(&item.name))
        }
        KeywordId::FileSize => match item.size {
            Some(size) => Cow::Owned(size.to_string()),
            None if item.is_dir => Cow::Borrowed("<DIR>"),
            None => Cow::Borrowed(""),
        },
        KeywordId::FileDate => Cow::Owned(format_time(item.modified, &options.date_format)),
        KeywordId::FileTime => Cow::Owned(format_time(item.modified, &options.time_format)),
        KeywordId::FileAttributes if item.is_disk => Cow::Owned(item.attributes.letters()),
        KeywordId::FilePath => Cow::Borrowed(dir),
        KeywordId::FileFullName => Cow::Owned(names::join(dir, &item.name)),
        _ => Cow::Borrowed(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CurrentItem, ListingItem, MapEnvironment, PanelPaths, PanelSide};
    use crate::error::ErrorSpan;
    use crate::keywords::{ARGUMENTS, INFO_LINE, MAKE_FILE_LIST, USER_MENU_ARGUMENTS};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn run(template: &str, table: &KeywordTable, ctx: &ExpansionContext) -> String {
        let mut out = OutputBuffer::new(1024);
        expand(
            template,
            table,
            ctx,
            &mut out,
            &ExpandOptions::default(),
            ExpandSinks::default(),
        )
        .unwrap();
        out.into_string()
    }

    fn compare_ctx(are_dirs: bool, reversed: bool) -> ExpansionContext {
        ExpansionContext::new().with_compare(ComparePair {
            first: "/a/one".into(),
            second: "/b/two".into(),
            are_dirs,
            reversed,
        })
    }

    #[rstest]
    #[case("$(FullName)", "C:\\work\\report.final.doc")]
    #[case("$(Name)", "report.final.doc")]
    #[case("$(NamePart)", "report.final")]
    #[case("$(ExtPart)", "doc")]
    #[case("$(FullPath)", "C:\\work\\")]
    #[case("$(Drive)", "C:")]
    #[case("$(DOSFullName)", "C:\\work\\REPORT~1.DOC")]
    #[case("$(DOSName)", "REPORT~1.DOC")]
    #[case("$(DOSNamePart).$(DOSExtPart)", "REPORT~1.DOC")]
    fn test_current_item_keywords(#[case] template: &str, #[case] expected: &str) {
        let ctx = ExpansionContext::new().with_current(
            CurrentItem::new("C:\\work\\report.final.doc").with_dos_name("C:\\work\\REPORT~1.DOC"),
        );
        assert_eq!(run(template, &ARGUMENTS, &ctx), expected);
    }

    #[rstest]
    #[case(false, false, "$(FileToCompareLeft)|$(FileToCompareRight)", "/a/one|/b/two")]
    #[case(false, true, "$(FileToCompareLeft)|$(FileToCompareRight)", "/b/two|/a/one")]
    #[case(false, true, "$(FileToCompareActive)|$(FileToCompareInactive)", "/a/one|/b/two")]
    #[case(true, false, "$(FileToCompareLeft)", "")]
    #[case(true, false, "$(DirToCompareLeft)", "/a/one")]
    #[case(false, false, "$(DirToCompareInactive)", "")]
    #[case(true, true, "$(FileOrDirToCompareRight)", "/a/one")]
    fn test_compare_keywords(
        #[case] are_dirs: bool,
        #[case] reversed: bool,
        #[case] template: &str,
        #[case] expected: &str,
    ) {
        let ctx = compare_ctx(are_dirs, reversed);
        assert_eq!(run(template, &USER_MENU_ARGUMENTS, &ctx), expected);
    }

    #[test]
    fn test_listing_fields() {
        let modified = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .unwrap();
        let ctx = ExpansionContext::new()
            .with_listing_dir("/data")
            .with_listing(
                ListingItem::new("notes.md")
                    .with_size(1234)
                    .with_modified(modified)
                    .with_dos_name("NOTES~1.MD"),
            );
        assert_eq!(
            run(
                "$(FileSize) $(FileDate) $(FileTime) $(DOSFileName) $(FileFullName)",
                &MAKE_FILE_LIST,
                &ctx
            ),
            "1234 2024-03-09 14:05:00 NOTES~1.MD /data/notes.md"
        );
    }

    #[test]
    fn test_off_disk_listing_hides_disk_metadata() {
        let ctx = ExpansionContext::new().with_listing(
            ListingItem::new("inner.txt")
                .with_dos_name("INNER.TXT")
                .off_disk(),
        );
        assert_eq!(run("[$(DOSFileName)][$(FileAttributes)]", &INFO_LINE, &ctx), "[][]");
    }

    #[test]
    fn test_directory_without_size() {
        let ctx = ExpansionContext::new().with_listing(ListingItem::directory("src"));
        assert_eq!(run("$(FileSize)", &INFO_LINE, &ctx), "<DIR>");
    }

    #[test]
    fn test_bad_date_format_expands_empty() {
        let modified = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let ctx = ExpansionContext::new()
            .with_listing(ListingItem::new("a").with_modified(modified));
        let options = ExpandOptions {
            date_format: "%Q".into(),
            ..ExpandOptions::default()
        };
        let mut out = OutputBuffer::new(64);
        expand(
            "<$(FileDate)>",
            &INFO_LINE,
            &ctx,
            &mut out,
            &options,
            ExpandSinks::default(),
        )
        .unwrap();
        assert_eq!(out.as_str(), "<>");
    }

    #[test]
    fn test_fixed_width_and_right_aligned_size() {
        let ctx = ExpansionContext::new().with_listing(ListingItem::new("a.txt").with_size(42));
        assert_eq!(
            run("$(FileName:8)|$(FileSize:6)|", &MAKE_FILE_LIST, &ctx),
            "a.txt   |    42|"
        );
    }

    #[test]
    fn test_detect_mode_records_all_columns_without_padding() {
        let ctx = ExpansionContext::new().with_listing(ListingItem::new("abc").with_size(12345));
        let mut widths = ColumnWidths::new(2);
        let mut out = OutputBuffer::new(64);
        let options = ExpandOptions {
            detect_max_var_sizes: true,
            ..ExpandOptions::default()
        };
        expand(
            "$(FileName:max) $(FileSize)",
            &MAKE_FILE_LIST,
            &ctx,
            &mut out,
            &options,
            ExpandSinks {
                column_widths: Some(&mut widths),
                placements: None,
            },
        )
        .unwrap();
        assert_eq!(out.as_str(), "abc 12345");
        assert_eq!(widths.as_slice(), &[3, 5]);
    }

    #[test]
    fn test_info_line_placements() {
        let ctx = ExpansionContext::new().with_listing(ListingItem::new("x.rs").with_size(7));
        let mut placements = Placements::new(8);
        let mut out = OutputBuffer::new(64);
        expand(
            "name: $(FileName), size: $(FileSize)",
            &INFO_LINE,
            &ctx,
            &mut out,
            &ExpandOptions::default(),
            ExpandSinks {
                column_widths: None,
                placements: Some(&mut placements),
            },
        )
        .unwrap();
        assert_eq!(out.as_str(), "name: x.rs, size: 7");
        assert_eq!(
            placements.as_slice(),
            &[
                Placement {
                    position: 6,
                    length: 4
                },
                Placement {
                    position: 18,
                    length: 1
                },
            ]
        );
    }

    #[test]
    fn test_env_too_long() {
        let ctx = ExpansionContext::new()
            .with_environment(MapEnvironment::new().with("BIG", "0123456789"));
        let options = ExpandOptions {
            env_value_max_len: 4,
            ..ExpandOptions::default()
        };
        let mut out = OutputBuffer::new(64);
        let err = expand(
            "x%BIG%",
            &ARGUMENTS,
            &ctx,
            &mut out,
            &options,
            ExpandSinks::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ExpandError::EnvVarTooLong {
                name: "BIG".into(),
                len: 10,
                max: 4,
                span: ErrorSpan::new(1, 6),
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_env_too_long_suppressed() {
        let ctx = ExpansionContext::new()
            .with_environment(MapEnvironment::new().with("BIG", "0123456789"));
        let options = ExpandOptions {
            env_value_max_len: 4,
            ignore_env_var_not_found_or_too_long: true,
            ..ExpandOptions::default()
        };
        let mut out = OutputBuffer::new(64);
        let outcome = expand(
            "a%BIG%b",
            &ARGUMENTS,
            &ctx,
            &mut out,
            &options,
            ExpandSinks::default(),
        )
        .unwrap();
        assert_eq!(out.as_str(), "ab");
        assert_eq!(outcome.written, 2);
    }

    #[test]
    fn test_file_name_used_flag() {
        let ctx = ExpansionContext::new()
            .with_app_dir("/opt/app")
            .with_panels(PanelPaths {
                left: Some("/l".into()),
                right: Some("/r".into()),
                active: PanelSide::Left,
            });
        let mut out = OutputBuffer::new(64);
        let outcome = expand(
            "$(AppDir)",
            &USER_MENU_ARGUMENTS,
            &ctx,
            &mut out,
            &ExpandOptions::default(),
            ExpandSinks::default(),
        )
        .unwrap();
        assert!(!outcome.file_name_used);
        let outcome = expand(
            "$(AppDir) $(FullPathInactive)",
            &USER_MENU_ARGUMENTS,
            &ctx,
            &mut out,
            &ExpandOptions::default(),
            ExpandSinks::default(),
        )
        .unwrap();
        assert!(outcome.file_name_used);
        assert_eq!(out.as_str(), "/opt/app /r");
        assert_eq!(outcome.written, 11);
    }
}
