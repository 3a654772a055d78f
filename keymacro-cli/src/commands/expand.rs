//! `keymacro expand` - expand one template against a described file manager state

use std::io::Write;

use anyhow::Result;
use keymacro::names;
use keymacro::{
    expand, validate, ColumnWidths, ComparePair, CurrentItem, ErrorReport, ExpandSinks,
    ExpansionContext, OutputBuffer, PanelPaths, Placements, SelectionList, TemplateContext,
};
use keymacro_config::EngineConfig;
use serde_json::json;

use super::report_error;
use crate::cli::{ExpandArgs, OutputFormat};
use crate::listing::listing_item_for_path;

/// Build the expansion context described by the command line
pub fn build_context(args: &ExpandArgs, config: &EngineConfig) -> Result<ExpansionContext> {
    let max_len = config.limits.selection_list_max_len;
    let selected_names = SelectionList::from_names(
        args.selected.iter().map(|full| names::file_name(full)),
        max_len,
    );
    let selected_full_names = SelectionList::from_names(&args.selected, max_len);

    let mut context = ExpansionContext::new()
        .with_panels(PanelPaths {
            left: args.left.clone(),
            right: args.right.clone(),
            active: args.active.into(),
        })
        .with_selection(selected_names, selected_full_names);

    if let Some(name) = &args.name {
        let mut current = CurrentItem::new(name.clone());
        if let Some(dos) = &args.dos_name {
            current = current.with_dos_name(dos.clone());
        }
        context = context.with_current(current);
    }

    if let [first, second] = args.compare.as_slice() {
        context = context.with_compare(ComparePair {
            first: first.clone(),
            second: second.clone(),
            are_dirs: args.compare_dirs,
            reversed: args.reversed,
        });
    }

    if let Some(path) = &args.file {
        context = context.with_listing(listing_item_for_path(path)?);
        if let Some(parent) = path.parent() {
            context = context.with_listing_dir(parent.display().to_string());
        }
    }

    let app_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.display().to_string()));
    if let Some(app_dir) = app_dir {
        context = context.with_app_dir(app_dir);
    }

    Ok(context)
}

pub fn run(
    args: &ExpandArgs,
    config: &EngineConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let template_context = TemplateContext::from(args.context);
    let table = template_context.table();

    let profile = match validate(&args.template, table) {
        Ok(profile) => profile,
        Err(e) => {
            report_error(&args.template, &ErrorReport::from(&e), format, out, err)?;
            return Ok(1);
        }
    };

    let context = build_context(args, config)?;
    for panel in profile.undefined_panel_paths(&context.panels) {
        tracing::warn!("Template uses the {:?} panel path but none was given", panel);
    }

    let mut options = config.expand_options();
    if args.ignore_env {
        options.ignore_env_var_not_found_or_too_long = true;
    }

    let mut buffer = OutputBuffer::new(args.capacity.unwrap_or(config.limits.output_capacity));
    let mut placements = Placements::new(config.limits.placement_capacity);
    let mut widths = ColumnWidths::new(config.limits.column_count);
    let sinks = match template_context {
        TemplateContext::InfoLine => ExpandSinks {
            column_widths: None,
            placements: Some(&mut placements),
        },
        TemplateContext::MakeFileList => ExpandSinks {
            column_widths: Some(&mut widths),
            placements: None,
        },
        _ => ExpandSinks::default(),
    };

    match expand(&args.template, table, &context, &mut buffer, &options, sinks) {
        Ok(outcome) => {
            if args.json {
                let mut value = json!({
                    "output": buffer.as_str(),
                    "outcome": outcome,
                    "profile": profile,
                });
                if template_context == TemplateContext::InfoLine {
                    value["placements"] = json!(placements.as_slice());
                }
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                writeln!(out, "{}", buffer.as_str())?;
            }
            Ok(0)
        }
        Err(e) => {
            report_error(&args.template, &ErrorReport::from(&e), format, out, err)?;
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymacro::PanelSide;

    fn args(template: &str) -> ExpandArgs {
        ExpandArgs {
            template: template.to_string(),
            ..ExpandArgs::default()
        }
    }

    #[test]
    fn test_build_context_selection_lists() {
        let args = ExpandArgs {
            selected: vec!["/a/x.txt".to_string(), "/a/my file".to_string()],
            ..args("")
        };
        let context = build_context(&args, &EngineConfig::default()).unwrap();
        assert_eq!(context.selected_names.as_str(), "x.txt \"my file\"");
        assert_eq!(
            context.selected_full_names.as_str(),
            "/a/x.txt \"/a/my file\""
        );
    }

    #[test]
    fn test_build_context_compare_pair() {
        let args = ExpandArgs {
            compare: vec!["/l/f".to_string(), "/r/f".to_string()],
            reversed: true,
            ..args("")
        };
        let context = build_context(&args, &EngineConfig::default()).unwrap();
        let pair = context.compare.unwrap();
        assert_eq!(pair.first, "/l/f");
        assert_eq!(pair.second, "/r/f");
        assert!(pair.reversed);
        assert!(!pair.are_dirs);
    }

    #[test]
    fn test_build_context_panels_and_current() {
        let args = ExpandArgs {
            name: Some("/home/u/a.txt".to_string()),
            dos_name: Some("/home/u/A~1.TXT".to_string()),
            right: Some("/srv".to_string()),
            active: crate::cli::SideArg::Right,
            ..args("")
        };
        let context = build_context(&args, &EngineConfig::default()).unwrap();
        assert_eq!(context.panels.active, PanelSide::Right);
        assert_eq!(context.panels.right.as_deref(), Some("/srv"));
        let current = context.current.unwrap();
        assert_eq!(current.dos_or_long(), "/home/u/A~1.TXT");
    }

    #[test]
    fn test_build_context_missing_file_is_error() {
        let args = ExpandArgs {
            file: Some("/definitely/not/here.txt".into()),
            ..args("")
        };
        assert!(build_context(&args, &EngineConfig::default()).is_err());
    }
}
