//! CLI definition for the keymacro command-line interface.
//!
//! Only depends on `clap`, `std` and the engine's public types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use keymacro::{PanelSide, TemplateContext};

/// Template context selecting the keyword table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ContextArg {
    /// User menu arguments
    #[default]
    UserMenuArguments,
    /// Hot path
    HotPath,
    /// Command line of an external program
    Command,
    /// Arguments of an external program
    Arguments,
    /// Initial directory of an external program
    InitDir,
    /// Info line content
    InfoLine,
    /// Generated file list line
    MakeFileList,
    /// Regular expression helper (snippets only)
    RegularExpression,
}

impl From<ContextArg> for TemplateContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::UserMenuArguments => TemplateContext::UserMenuArguments,
            ContextArg::HotPath => TemplateContext::HotPath,
            ContextArg::Command => TemplateContext::Command,
            ContextArg::Arguments => TemplateContext::Arguments,
            ContextArg::InitDir => TemplateContext::InitDir,
            ContextArg::InfoLine => TemplateContext::InfoLine,
            ContextArg::MakeFileList => TemplateContext::MakeFileList,
            ContextArg::RegularExpression => TemplateContext::RegularExpression,
        }
    }
}

/// Which panel has focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    #[default]
    Left,
    Right,
}

impl From<SideArg> for PanelSide {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => PanelSide::Left,
            SideArg::Right => PanelSide::Right,
        }
    }
}

/// Structured output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    Json,
    Yaml,
}

/// Keymacro - keyword macro templates for file manager commands
#[derive(Parser, Debug)]
#[command(name = "keymacro")]
#[command(version)]
#[command(about = "Validate and expand keyword macro templates")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the keyword table of a context in menu order
    Keywords {
        #[arg(value_enum)]
        context: ContextArg,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a template and print its usage profile
    Validate {
        #[arg(value_enum)]
        context: ContextArg,
        template: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Expand a template against the given file manager state
    Expand(ExpandArgs),
    /// Expand a generated file list template for every entry of a directory
    List {
        template: String,
        dir: PathBuf,
        /// Output buffer capacity per line in bytes
        #[arg(long)]
        capacity: Option<usize>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExpandArgs {
    #[arg(value_enum)]
    pub context: ContextArg,
    pub template: String,
    /// Full name of the current item
    #[arg(long)]
    pub name: Option<String>,
    /// DOS (8.3) full name of the current item
    #[arg(long)]
    pub dos_name: Option<String>,
    /// Path shown in the left panel
    #[arg(long)]
    pub left: Option<String>,
    /// Path shown in the right panel
    #[arg(long)]
    pub right: Option<String>,
    /// Panel with focus
    #[arg(long, value_enum, default_value_t = SideArg::Left)]
    pub active: SideArg,
    /// Selected full names (repeatable)
    #[arg(long = "selected")]
    pub selected: Vec<String>,
    /// Compare pair: active item, then inactive item
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
    pub compare: Vec<String>,
    /// The compare pair holds directories
    #[arg(long)]
    pub compare_dirs: bool,
    /// The first compare item comes from the right panel
    #[arg(long)]
    pub reversed: bool,
    /// File to describe for info-line and file-list templates
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Substitute empty text for missing or oversized environment variables
    #[arg(long)]
    pub ignore_env: bool,
    /// Output buffer capacity in bytes
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_keywords() {
        let cli = Cli::parse_from(["keymacro", "keywords", "info-line"]);
        assert!(!cli.debug);
        assert!(matches!(
            cli.command,
            Commands::Keywords {
                context: ContextArg::InfoLine,
                format: OutputFormat::Text
            }
        ));
    }

    #[test]
    fn test_cli_parsing_validate_with_global_debug() {
        let cli = Cli::parse_from([
            "keymacro",
            "validate",
            "user-menu-arguments",
            "$(FullName)",
            "--debug",
            "--format",
            "json",
        ]);
        assert!(cli.debug);
        match cli.command {
            Commands::Validate {
                context,
                template,
                format,
            } => {
                assert_eq!(context, ContextArg::UserMenuArguments);
                assert_eq!(template, "$(FullName)");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_parsing_expand() {
        let cli = Cli::parse_from([
            "keymacro",
            "expand",
            "user-menu-arguments",
            "$(ListOfSelectedNames)",
            "--selected",
            "/a/x",
            "--selected",
            "/a/y",
            "--compare",
            "/l/f",
            "/r/f",
            "--active",
            "right",
            "--ignore-env",
            "--capacity",
            "10",
        ]);
        let Commands::Expand(args) = cli.command else {
            panic!("expected expand");
        };
        assert_eq!(args.selected, vec!["/a/x", "/a/y"]);
        assert_eq!(args.compare, vec!["/l/f", "/r/f"]);
        assert_eq!(args.active, SideArg::Right);
        assert!(args.ignore_env);
        assert_eq!(args.capacity, Some(10));
        assert!(!args.json);
    }

    #[test]
    fn test_cli_rejects_unknown_context() {
        assert!(Cli::try_parse_from(["keymacro", "keywords", "bogus"]).is_err());
    }

    #[test]
    fn test_context_arg_maps_to_engine_context() {
        for (arg, ctx) in ContextArg::value_variants()
            .iter()
            .zip(TemplateContext::ALL)
        {
            assert_eq!(TemplateContext::from(*arg), ctx);
        }
    }
}
