//! Row substitution engine

use std::collections::HashMap;

use serde::Serialize;

use super::GenerateError;
use crate::table::TabularSource;
use crate::template::{Template, VariableSet};

/// Display row of the first data row (the header is row 1)
const FIRST_DATA_ROW: usize = 2;

/// Maps template variables to differently named spreadsheet columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnBindings {
    bindings: HashMap<String, String>,
}

impl ColumnBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `variable` from `column` instead of a column of the same name
    pub fn bind(&mut self, variable: impl Into<String>, column: impl Into<String>) {
        self.bindings.insert(variable.into(), column.into());
    }

    /// Parse a `VAR=COLUMN` binding
    pub fn parse_binding(spec: &str) -> Option<(String, String)> {
        let (variable, column) = spec.split_once('=')?;
        let (variable, column) = (variable.trim(), column.trim());
        if variable.is_empty() || column.is_empty() {
            return None;
        }
        Some((variable.to_string(), column.to_string()))
    }

    /// Column that feeds a variable
    pub fn column_for<'a>(&'a self, variable: &'a str) -> &'a str {
        self.bindings
            .get(variable)
            .map(|c| c.as_str())
            .unwrap_or(variable)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<V: Into<String>, C: Into<String>> FromIterator<(V, C)> for ColumnBindings {
    fn from_iter<T: IntoIterator<Item = (V, C)>>(iter: T) -> Self {
        let mut bindings = ColumnBindings::new();
        for (variable, column) in iter {
            bindings.bind(variable, column);
        }
        bindings
    }
}

/// Options for a generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub bindings: ColumnBindings,
}

/// One generated command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    /// Display row the command was generated from (header is row 1)
    pub row: usize,
    /// The generated command text
    pub command: String,
}

/// A data row left out of the output because a required value was blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Display row (header is row 1)
    pub row: usize,
    /// Variables whose values were blank, sorted
    pub blank_variables: Vec<String>,
}

/// Commands generated from one source, in row order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationResult {
    pub commands: Vec<CommandRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl GenerationResult {
    /// Command strings in output order
    pub fn command_strings(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.command.as_str()).collect()
    }

    /// Display indices of the skipped rows
    pub fn skipped_rows(&self) -> Vec<usize> {
        self.skipped.iter().map(|s| s.row).collect()
    }

    /// The output artifact text: one command per line, no trailing newline
    pub fn to_text(&self) -> String {
        self.command_strings().join("\n")
    }
}

/// Generate commands with default options
pub fn generate<S: TabularSource + ?Sized>(
    template: &Template,
    variables: &VariableSet,
    source: &S,
) -> Result<GenerationResult, GenerateError> {
    generate_with(template, variables, source, &GenerateOptions::default())
}

/// Parse `template_text` and generate commands from `source`
pub fn generate_from_template<S: TabularSource + ?Sized>(
    template_text: &str,
    source: &S,
    options: &GenerateOptions,
) -> Result<GenerationResult, GenerateError> {
    let template = Template::parse_required(template_text)?;
    let variables = template.variables();
    generate_with(&template, &variables, source, options)
}

/// Generate one command per complete row of `source`.
///
/// Fails when the variable set is empty, when columns are missing, or when no
/// row produced a command.
pub fn generate_with<S: TabularSource + ?Sized>(
    template: &Template,
    variables: &VariableSet,
    source: &S,
    options: &GenerateOptions,
) -> Result<GenerationResult, GenerateError> {
    if variables.is_empty() {
        return Err(GenerateError::NoVariablesFound);
    }

    let bindings = &options.bindings;

    let mut missing: Vec<String> = variables
        .iter()
        .map(|v| bindings.column_for(v))
        .filter(|column| !source.has_column(column))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        return Err(GenerateError::MissingColumns(missing));
    }

    let mut result = GenerationResult::default();

    for (idx, row) in source.rows().iter().enumerate() {
        let display_row = idx + FIRST_DATA_ROW;

        let mut values: HashMap<&str, String> = HashMap::with_capacity(variables.len());
        let mut blank_variables = Vec::new();

        for variable in variables {
            match row.get(bindings.column_for(variable)) {
                Some(value) if !value.is_blank() => {
                    values.insert(variable.as_str(), value.to_text());
                }
                _ => blank_variables.push(variable.clone()),
            }
        }

        if !blank_variables.is_empty() {
            log::debug!(
                "Row {} skipped, blank value for: {}",
                display_row,
                blank_variables.join(", ")
            );
            result.skipped.push(SkippedRow {
                row: display_row,
                blank_variables,
            });
            continue;
        }

        let command = template.render(|name| values.get(name));
        result.commands.push(CommandRecord {
            row: display_row,
            command,
        });
    }

    log::info!(
        "Generated {} command(s) from {} row(s), {} skipped",
        result.commands.len(),
        source.rows().len(),
        result.skipped.len()
    );

    if result.commands.is_empty() {
        return Err(GenerateError::NoCommandsGenerated {
            skipped: result.skipped.len(),
        });
    }

    Ok(result)
}
