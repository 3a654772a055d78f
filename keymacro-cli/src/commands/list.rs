//! `keymacro list` - generate an aligned file list for a directory

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use keymacro::contexts::{expand_make_file_list, validate_make_file_list};
use keymacro::{ColumnWidths, ErrorReport, ExpandOptions, ExpansionContext, OutputBuffer};
use keymacro_config::EngineConfig;

use super::report_error;
use crate::cli::OutputFormat;
use crate::listing::read_listing;

/// Expand `template` once per entry of `dir`.
///
/// The first pass only measures `:max` columns; the second prints every
/// line padded to the widest value seen.
pub fn run(
    template: &str,
    dir: &Path,
    capacity: Option<usize>,
    config: &EngineConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    if let Err(e) = validate_make_file_list(template) {
        report_error(template, &ErrorReport::from(&e), OutputFormat::Text, out, err)?;
        return Ok(1);
    }

    let items = read_listing(dir)?;
    let mut context = ExpansionContext::new().with_listing_dir(dir.display().to_string());
    let mut buffer = OutputBuffer::new(capacity.unwrap_or(config.limits.output_capacity));
    let mut widths = ColumnWidths::new(config.limits.column_count);

    let measure = ExpandOptions {
        detect_max_var_sizes: true,
        ..config.expand_options()
    };
    let print = ExpandOptions {
        detect_max_var_sizes: false,
        ..config.expand_options()
    };

    for item in &items {
        context.set_listing(item.clone());
        let measured = expand_make_file_list(
            template,
            &context,
            &mut buffer,
            &measure,
            Some(&mut widths),
        );
        if let Err(e) = measured {
            report_error(template, &ErrorReport::from(&e), OutputFormat::Text, out, err)?;
            return Ok(1);
        }
    }
    tracing::debug!(columns = ?widths.as_slice(), "measured file list columns");

    for item in items {
        context.set_listing(item);
        match expand_make_file_list(template, &context, &mut buffer, &print, Some(&mut widths)) {
            Ok(_) => writeln!(out, "{}", buffer.as_str())?,
            Err(e) => {
                report_error(template, &ErrorReport::from(&e), OutputFormat::Text, out, err)?;
                return Ok(1);
            }
        }
    }
    Ok(0)
}
