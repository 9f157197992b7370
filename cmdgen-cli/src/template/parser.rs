//! Placeholder scanner for command templates

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Template, TemplatePart, VariableSet};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid")
});

/// Split a template string into literal text and placeholders
pub fn parse_template(input: &str) -> Template {
    let mut parts = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > last {
            parts.push(TemplatePart::Literal(input[last..whole.start()].to_string()));
        }
        parts.push(TemplatePart::Placeholder(name.as_str().to_string()));
        last = whole.end();
    }

    if last < input.len() {
        parts.push(TemplatePart::Literal(input[last..].to_string()));
    }

    Template::new(parts, input.to_string())
}

/// Collect the distinct placeholder names in a template.
///
/// Returns an empty set for templates without placeholders; callers that
/// need at least one use [`Template::parse_required`].
pub fn extract_variables(template: &str) -> VariableSet {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
