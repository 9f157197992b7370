//! `columns` command: show the sheets and header of a spreadsheet

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::table::{ExcelSource, TabularSource};

pub fn handle_columns_command(file: &Path, sheet: Option<&str>) -> Result<()> {
    let sheets = ExcelSource::sheet_names(file)
        .with_context(|| format!("Failed to inspect {}", file.display()))?;
    let source = ExcelSource::open(file, sheet)?;

    println!("{}", "Sheets:".bold());
    for name in &sheets {
        if name == source.sheet_name() {
            println!("  {} {}", name.bright_green().bold(), "(selected)".dimmed());
        } else {
            println!("  {}", name);
        }
    }

    println!();
    println!("{}", "Columns:".bold());
    for (idx, column) in source.columns().iter().enumerate() {
        let label = column_letter(idx);
        if column.is_empty() {
            println!("  {:>3}  {}", label.dimmed(), "(blank, ignored)".dimmed());
        } else {
            println!("  {:>3}  {{{}}}", label.dimmed(), column.cyan());
        }
    }

    println!();
    println!("{} data row(s)", source.rows().len());
    Ok(())
}

/// Spreadsheet column letter for a zero-based index (0 -> A, 26 -> AA)
fn column_letter(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().collect()
}
