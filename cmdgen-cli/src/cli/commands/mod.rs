//! Subcommand handlers

pub mod columns;
pub mod generate;
pub mod vars;

use std::fs;

use anyhow::{Context, Result, bail};

use super::TemplateSource;

/// Read the template text from the command line or a file.
///
/// Surrounding whitespace (including a trailing newline in the file) is trimmed.
pub fn read_template(source: &TemplateSource) -> Result<String> {
    let text = match (&source.template, &source.template_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {}", path.display()))?,
        (None, None) => bail!("Either provide --template or use --template-file"),
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        bail!("Command template is empty");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_template_inline() {
        let source = TemplateSource {
            template: Some("  Mod A={x};\n".into()),
            template_file: None,
        };
        assert_eq!(read_template(&source).unwrap(), "Mod A={x};");
    }

    #[test]
    fn test_read_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.txt");
        fs::write(&path, "Mod Bscex:MSISDN={x},SMSRouterID={y};\n").unwrap();

        let source = TemplateSource {
            template: None,
            template_file: Some(path),
        };
        assert_eq!(
            read_template(&source).unwrap(),
            "Mod Bscex:MSISDN={x},SMSRouterID={y};"
        );
    }

    #[test]
    fn test_read_template_empty_or_missing() {
        let source = TemplateSource {
            template: Some("   ".into()),
            template_file: None,
        };
        assert!(read_template(&source).is_err());

        let source = TemplateSource {
            template: None,
            template_file: Some("/nonexistent/template.txt".into()),
        };
        assert!(read_template(&source).is_err());
    }
}
