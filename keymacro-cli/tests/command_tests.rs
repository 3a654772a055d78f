//! Commands driven with in-memory writers

use std::fs;

use keymacro::TemplateContext;
use keymacro_cli::commands::{expand, keywords, list, validate};
use keymacro_cli::{ContextArg, ExpandArgs, OutputFormat};
use keymacro_config::EngineConfig;
use rstest::rstest;
use tempfile::TempDir;

struct Captured {
    code: i32,
    out: String,
    err: String,
}

fn run_validate(context: TemplateContext, template: &str, format: OutputFormat) -> Captured {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = validate::run(context, template, format, &mut out, &mut err).unwrap();
    Captured {
        code,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

fn run_expand(args: &ExpandArgs) -> Captured {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = expand::run(args, &EngineConfig::default(), &mut out, &mut err).unwrap();
    Captured {
        code,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

fn expand_args(context: ContextArg, template: &str) -> ExpandArgs {
    ExpandArgs {
        context,
        template: template.to_string(),
        ..ExpandArgs::default()
    }
}

#[test]
fn test_keywords_text_lists_menu_order() {
    let mut out = Vec::new();
    keywords::run(TemplateContext::UserMenuArguments, OutputFormat::Text, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("Full Name"));
    assert!(lines[0].ends_with("$(FullName)"));
    assert!(lines.contains(&"DOS Names >"));
    assert!(lines.iter().any(|l| l.starts_with("  DOS Full Name")));
    assert!(lines.contains(&"---"));
}

#[test]
fn test_keywords_json_is_parseable() {
    let mut out = Vec::new();
    keywords::run(TemplateContext::InfoLine, OutputFormat::Json, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), TemplateContext::InfoLine.table().entries().len());
}

#[test]
fn test_validate_valid_template_prints_profile() {
    let result = run_validate(
        TemplateContext::UserMenuArguments,
        "$(ListOfSelectedNames) $(FullPathInactive)",
        OutputFormat::Text,
    );
    assert_eq!(result.code, 0);
    assert!(result.out.starts_with("valid"));
    assert!(result.out.contains("processing: as a group"));
    assert!(result.out.contains("selection lists: names"));
    assert!(result.out.contains("panel paths: inactive"));
    assert!(result.err.is_empty());
}

#[test]
fn test_validate_error_highlights_reference() {
    let result = run_validate(
        TemplateContext::UserMenuArguments,
        "x $(Bogus) y",
        OutputFormat::Text,
    );
    assert_eq!(result.code, 1);
    assert!(result.out.is_empty());
    assert!(result.err.starts_with("error: "));
    assert!(result.err.contains("x $(Bogus) y"));
    assert!(result.err.contains("  ^^^^^^^^"));
}

#[test]
fn test_validate_error_as_json() {
    let result = run_validate(
        TemplateContext::HotPath,
        "$(ListOfSelectedNames)",
        OutputFormat::Json,
    );
    assert_eq!(result.code, 1);
    let value: serde_json::Value = serde_json::from_str(&result.out).unwrap();
    assert_eq!(value["kind"], "unknown_keyword");
    assert_eq!(value["severity"], "error");
    assert_eq!(value["span"]["start"], 0);
    assert_eq!(value["span"]["end"], 22);
}

#[rstest]
#[case(OutputFormat::Json)]
#[case(OutputFormat::Yaml)]
fn test_validate_profile_structured_output(#[case] format: OutputFormat) {
    let result = run_validate(TemplateContext::UserMenuArguments, "$(Name)", format);
    assert_eq!(result.code, 0);
    assert!(result.out.contains("must_handle_one_by_one"));
}

#[test]
fn test_expand_current_item() {
    let args = ExpandArgs {
        name: Some("/home/u/report.txt".to_string()),
        ..expand_args(ContextArg::UserMenuArguments, "$(NamePart)-$(ExtPart)")
    };
    let result = run_expand(&args);
    assert_eq!(result.code, 0);
    assert_eq!(result.out, "report-txt\n");
}

#[test]
fn test_expand_compare_pair() {
    let args = ExpandArgs {
        compare: vec!["/l/a.txt".to_string(), "/r/a.txt".to_string()],
        ..expand_args(
            ContextArg::UserMenuArguments,
            "$(FileToCompareLeft) $(FileToCompareRight)",
        )
    };
    let result = run_expand(&args);
    assert_eq!(result.code, 0);
    assert_eq!(result.out, "/l/a.txt /r/a.txt\n");
}

#[test]
fn test_expand_missing_env_var_depends_on_ignore_flag() {
    let template = "[%KEYMACRO_CLI_TEST_SURELY_UNSET%]";

    let strict = run_expand(&expand_args(ContextArg::Command, template));
    assert_eq!(strict.code, 1);
    assert!(strict.out.is_empty());
    assert!(strict.err.starts_with("warning: "));

    let lenient = run_expand(&ExpandArgs {
        ignore_env: true,
        ..expand_args(ContextArg::Command, template)
    });
    assert_eq!(lenient.code, 0);
    assert_eq!(lenient.out, "[]\n");
}

#[test]
fn test_expand_capacity_override() {
    let args = ExpandArgs {
        capacity: Some(4),
        ..expand_args(ContextArg::Command, "abcde")
    };
    let result = run_expand(&args);
    assert_eq!(result.code, 1);
    assert!(result.err.contains("error: "));

    let args = ExpandArgs {
        capacity: Some(5),
        ..expand_args(ContextArg::Command, "abcde")
    };
    assert_eq!(run_expand(&args).out, "abcde\n");
}

#[test]
fn test_expand_info_line_json_has_placements() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("note.txt");
    fs::write(&file, "hello").unwrap();

    let args = ExpandArgs {
        file: Some(file),
        json: true,
        ..expand_args(ContextArg::InfoLine, "$(FileName) $(FileSize)")
    };
    let result = run_expand(&args);
    assert_eq!(result.code, 0);

    let value: serde_json::Value = serde_json::from_str(&result.out).unwrap();
    assert_eq!(value["output"], "note.txt 5");
    assert_eq!(value["outcome"]["file_name_used"], true);
    let placements = value["placements"].as_array().unwrap();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0]["position"], 0);
    assert_eq!(placements[0]["length"], 8);
    assert_eq!(placements[1]["position"], 9);
    assert_eq!(placements[1]["length"], 1);
}

#[test]
fn test_list_aligns_max_columns() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "abc").unwrap();
    fs::write(dir.path().join("longer_name.md"), "0123456789").unwrap();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = list::run(
        "$(FileName:max)|$(FileSize)",
        dir.path(),
        None,
        &EngineConfig::default(),
        &mut out,
        &mut err,
    )
    .unwrap();

    assert_eq!(code, 0);
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["a.txt         |3", "longer_name.md|10"]);
}

#[test]
fn test_list_rejects_invalid_template() {
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = list::run(
        "$(FileName:wide)",
        dir.path(),
        None,
        &EngineConfig::default(),
        &mut out,
        &mut err,
    )
    .unwrap();

    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(!err.is_empty());
}

#[test]
fn test_list_missing_directory_is_error() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = list::run(
        "$(FileName)",
        std::path::Path::new("/definitely/not/a/dir"),
        None,
        &EngineConfig::default(),
        &mut out,
        &mut err,
    );
    assert!(result.is_err());
}
