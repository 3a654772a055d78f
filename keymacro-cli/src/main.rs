//! Keymacro CLI - validate and expand keyword macro templates.
//!
//! Commands:
//! - `keymacro keywords <context>`: Print the keyword table of a context
//! - `keymacro validate <context> <template>`: Check a template, print its usage profile
//! - `keymacro expand <context> <template> [state...]`: Expand a template
//! - `keymacro list <template> <dir>`: Aligned file list for a directory
//!
//! Exit codes:
//! - 0: Success
//! - 1: Invalid template, expansion failure or other error

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keymacro_cli::commands::{expand, keywords, list, validate};
use keymacro_cli::{Cli, Commands};
use keymacro_config::load_configuration;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("keymacro=debug,keymacro_cli=debug,keymacro_config=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = dispatch_command(cli);
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
fn dispatch_command(cli: Cli) -> i32 {
    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut out = io::stdout();
    let mut err = io::stderr();
    let result = match cli.command {
        Commands::Keywords { context, format } => {
            keywords::run(context.into(), format, &mut out).map(|()| 0)
        }
        Commands::Validate {
            context,
            template,
            format,
        } => validate::run(context.into(), &template, format, &mut out, &mut err),
        Commands::Expand(args) => expand::run(&args, &config, &mut out, &mut err),
        Commands::List {
            template,
            dir,
            capacity,
        } => list::run(&template, &dir, capacity, &config, &mut out, &mut err),
    };
    result_to_exit(result)
}

/// Convert a command result to an exit code.
fn result_to_exit(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
