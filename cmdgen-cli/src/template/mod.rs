//! Command templates with `{name}` placeholders
//!
//! A placeholder is an opening brace, one or more ASCII word characters
//! (`[A-Za-z0-9_]`), and a closing brace. Anything else, including `{x-1}` or
//! an unterminated `{`, is literal text.

mod parser;

use std::collections::BTreeSet;

use serde::Serialize;

pub use parser::{extract_variables, parse_template};

use crate::generate::GenerateError;

/// Distinct placeholder names required by a template, in sorted order
pub type VariableSet = BTreeSet<String>;

/// A parsed command template.
///
/// Only built by parsing, so `parts` always describes `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Literal text and placeholders, in template order
    parts: Vec<TemplatePart>,
    /// The original template string
    source: String,
}

/// A part of a command template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TemplatePart {
    /// Text copied to the output unchanged
    Literal(String),
    /// A `{name}` placeholder
    Placeholder(String),
}

impl Template {
    pub(crate) fn new(parts: Vec<TemplatePart>, source: String) -> Self {
        Self { parts, source }
    }

    /// Parse a template. Never fails; a template without placeholders is all literal.
    pub fn parse(source: &str) -> Self {
        parse_template(source)
    }

    /// Parse a template that must contain at least one placeholder
    pub fn parse_required(source: &str) -> Result<Self, GenerateError> {
        let template = Self::parse(source);
        if template.has_placeholders() {
            Ok(template)
        } else {
            Err(GenerateError::NoVariablesFound)
        }
    }

    /// The original template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Literal text and placeholders, in template order
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Check whether the template contains any placeholder
    pub fn has_placeholders(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, TemplatePart::Placeholder(_)))
    }

    /// Distinct variable names referenced by the template
    pub fn variables(&self) -> VariableSet {
        self.parts
            .iter()
            .filter_map(|p| match p {
                TemplatePart::Placeholder(name) => Some(name.clone()),
                TemplatePart::Literal(_) => None,
            })
            .collect()
    }

    /// Render the template in a single pass.
    ///
    /// `lookup` is called once per placeholder occurrence. Placeholders it
    /// returns `None` for are written back as `{name}`. Substituted text is
    /// never re-scanned for placeholders.
    pub fn render<F, S>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> Option<S>,
        S: AsRef<str>,
    {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Placeholder(name) => match lookup(name) {
                    Some(value) => out.push_str(value.as_ref()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
