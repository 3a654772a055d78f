//! `keymacro validate` - check a template and show its usage profile

use std::io::Write;

use anyhow::Result;
use keymacro::{validate, CompareType, ErrorReport, TemplateContext, UsageProfile};

use super::report_error;
use crate::cli::OutputFormat;

pub fn run(
    context: TemplateContext,
    template: &str,
    format: OutputFormat,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    match validate(template, context.table()) {
        Ok(profile) => {
            match format {
                OutputFormat::Text => write_profile(&profile, out)?,
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&profile)?)?,
                OutputFormat::Yaml => write!(out, "{}", serde_yaml_ng::to_string(&profile)?)?,
            }
            Ok(0)
        }
        Err(e) => {
            report_error(template, &ErrorReport::from(&e), format, out, err)?;
            Ok(1)
        }
    }
}

fn processing_mode(profile: &UsageProfile) -> &'static str {
    match (profile.must_handle_as_group, profile.must_handle_one_by_one) {
        (true, _) => "as a group",
        (false, true) => "one by one",
        (false, false) => "either",
    }
}

fn write_profile(profile: &UsageProfile, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "valid")?;
    writeln!(out, "  processing: {}", processing_mode(profile))?;

    let mut lists = Vec::new();
    if profile.uses_list_of_sel_names {
        lists.push("names");
    }
    if profile.uses_list_of_sel_full_names {
        lists.push("full names");
    }
    if !lists.is_empty() {
        writeln!(out, "  selection lists: {}", lists.join(", "))?;
    }

    let panels: Vec<&str> = [
        (profile.uses_full_path_left, "left"),
        (profile.uses_full_path_right, "right"),
        (profile.uses_full_path_inactive, "inactive"),
    ]
    .into_iter()
    .filter(|(used, _)| *used)
    .map(|(_, name)| name)
    .collect();
    if !panels.is_empty() {
        writeln!(out, "  panel paths: {}", panels.join(", "))?;
    }

    if profile.compare_type != CompareType::None {
        let sides = if profile.uses_both_compare_sides() {
            "both operands"
        } else {
            "one operand"
        };
        writeln!(out, "  compare: {:?} ({})", profile.compare_type, sides)?;
    }
    Ok(())
}
