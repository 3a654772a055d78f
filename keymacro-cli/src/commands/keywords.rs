//! `keymacro keywords` - print a keyword table

use std::io::Write;

use anyhow::Result;
use keymacro::{KeywordTable, TableEntry, TemplateContext};

use crate::cli::OutputFormat;

pub fn run(context: TemplateContext, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let table = context.table();
    match format {
        OutputFormat::Text => write_text(table, out)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(table.entries())?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml_ng::to_string(table.entries())?)?,
    }
    Ok(())
}

/// Menu-like listing: label, then what gets inserted
fn write_text(table: &KeywordTable, out: &mut dyn Write) -> Result<()> {
    let mut indent = "";
    for entry in table.entries() {
        match entry {
            TableEntry::Keyword(def) => {
                let inserted = if def.is_substitutable() {
                    format!("$({})", def.keyword)
                } else {
                    def.keyword.to_string()
                };
                writeln!(out, "{}{:<40} {}", indent, def.label, inserted)?;
            }
            TableEntry::Separator => writeln!(out, "{}---", indent)?,
            TableEntry::Browse => writeln!(out, "{}Browse...", indent)?,
            TableEntry::Help => writeln!(out, "{}Help", indent)?,
            TableEntry::SubmenuStart { label } => {
                writeln!(out, "{} >", label)?;
                indent = "  ";
            }
            TableEntry::SubmenuEnd => indent = "",
        }
    }
    Ok(())
}
