//! `generate` command: spreadsheet + template -> commands file

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use serde::Serialize;

use super::read_template;
use crate::cli::GenerateArgs;
use crate::config::{Config, ConfigBuilder};
use crate::generate::{ColumnBindings, GenerateOptions, GenerationResult, generate_from_template};
use crate::output::{StagedInput, write_commands};
use crate::table::ExcelSource;

/// Result printed by `--json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    template: &'a str,
    sheet: &'a str,
    output: &'a Path,
    #[serde(flatten)]
    result: &'a GenerationResult,
}

/// Handle the generate command
pub fn handle_generate_command(args: GenerateArgs, config: Config) -> Result<()> {
    let template = read_template(&args.template)?;
    let config = apply_overrides(config, &args);
    let options = GenerateOptions {
        bindings: parse_bindings(&args.bindings)?,
    };

    let source = read_source(&args, &config)?;
    log::info!(
        "Generating from sheet '{}' with template: {}",
        source.sheet_name(),
        template
    );

    let result = generate_from_template(&template, &source, &options)
        .context("Failed to generate commands")?;

    let output_path = config.output_path();
    write_commands(&output_path, &result)?;

    if args.json {
        let report = JsonReport {
            template: &template,
            sheet: source.sheet_name(),
            output: &output_path,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for skipped in &result.skipped {
        eprintln!(
            "{} Row {} skipped (blank: {})",
            "warning:".yellow().bold(),
            skipped.row,
            skipped.blank_variables.join(", ")
        );
    }

    if config.print_commands && !args.quiet {
        for command in result.command_strings() {
            println!("{}", command);
        }
    }

    let shown_path = std::path::absolute(&output_path).unwrap_or_else(|_| output_path.clone());
    eprintln!(
        "{} {} command(s) saved to {}",
        "✓".bright_green().bold(),
        result.commands.len(),
        shown_path.display().to_string().cyan()
    );

    Ok(())
}

/// Layer command-line flags over the loaded configuration
fn apply_overrides(config: Config, args: &GenerateArgs) -> Config {
    let mut builder = ConfigBuilder::from_config(config);
    if let Some(sheet) = &args.sheet {
        builder = builder.sheet(sheet.clone());
    }
    if let Some(output) = &args.output {
        builder = builder.output_path(output);
    }
    if args.quiet {
        builder = builder.print_commands(false);
    }
    builder.build()
}

/// Parse `VAR=COLUMN` flags into bindings
fn parse_bindings(specs: &[String]) -> Result<ColumnBindings> {
    let mut bindings = ColumnBindings::new();
    for spec in specs {
        let Some((variable, column)) = ColumnBindings::parse_binding(spec) else {
            bail!("Invalid binding '{}'. Expected 'VAR=COLUMN'", spec);
        };
        bindings.bind(variable, column);
    }
    Ok(bindings)
}

/// Open the spreadsheet named on the command line, staging stdin when asked
fn read_source(args: &GenerateArgs, config: &Config) -> Result<ExcelSource> {
    let sheet = config.sheet.as_deref();

    if args.reads_stdin() {
        let stdin = std::io::stdin().lock();
        let staged = StagedInput::from_reader(&args.input_name, stdin, config.max_input_bytes)
            .context("Failed to read spreadsheet from stdin")?;
        // The staged copy is removed when `staged` drops at the end of this scope
        return Ok(staged.open(sheet)?);
    }

    let path = &args.file;
    if !path.exists() {
        bail!("Spreadsheet file does not exist: {}", path.display());
    }
    Ok(ExcelSource::open(path, sheet)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TemplateSource;
    use rust_xlsxwriter::Workbook;
    use std::path::PathBuf;

    fn args(file: PathBuf, template: &str, output: PathBuf) -> GenerateArgs {
        GenerateArgs {
            file,
            template: TemplateSource {
                template: Some(template.to_string()),
                template_file: None,
            },
            sheet: None,
            bindings: Vec::new(),
            output: Some(output),
            input_name: "stdin.xlsx".into(),
            quiet: true,
            json: false,
        }
    }

    fn write_bscex_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "MSISDN").unwrap();
        sheet.write_string(0, 1, "SMSRouterID").unwrap();
        sheet.write_number(1, 0, 8613800138000.0).unwrap();
        sheet.write_number(1, 1, 5.0).unwrap();
        sheet.write_number(2, 1, 6.0).unwrap();
        sheet.write_number(3, 0, 8613800138001.0).unwrap();
        sheet.write_number(3, 1, 7.0).unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_generate_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.xlsx");
        let output = dir.path().join("out").join("commands.txt");
        write_bscex_workbook(&input);

        handle_generate_command(
            args(
                input,
                "Mod Bscex:MSISDN={MSISDN},SMSRouterID={SMSRouterID};",
                output.clone(),
            ),
            Config::default(),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Mod Bscex:MSISDN=8613800138000,SMSRouterID=5;\n\
             Mod Bscex:MSISDN=8613800138001,SMSRouterID=7;"
        );
    }

    #[test]
    fn test_generate_with_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.xlsx");
        let output = dir.path().join("commands.txt");
        write_bscex_workbook(&input);

        let mut generate_args = args(input, "MSISDN={x},ID={y};", output.clone());
        generate_args.bindings = vec!["x=MSISDN".into(), "y=SMSRouterID".into()];

        handle_generate_command(generate_args, Config::default()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "MSISDN=8613800138000,ID=5;\nMSISDN=8613800138001,ID=7;"
        );
    }

    #[test]
    fn test_generate_missing_column_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.xlsx");
        let output = dir.path().join("commands.txt");
        write_bscex_workbook(&input);

        let err = handle_generate_command(
            args(input, "{MSISDN} {IMSI}", output.clone()),
            Config::default(),
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("IMSI"));
        assert!(!output.exists());
    }

    #[test]
    fn test_generate_rejects_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        std::fs::write(&input, "x\n1\n").unwrap();

        let err = handle_generate_command(
            args(input, "{x}", dir.path().join("commands.txt")),
            Config::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<crate::generate::GenerateError>(),
            Some(crate::generate::GenerateError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_bindings() {
        let bindings = parse_bindings(&["x=MSISDN".to_string()]).unwrap();
        assert_eq!(bindings.column_for("x"), "MSISDN");
        assert_eq!(bindings.column_for("y"), "y");

        assert!(parse_bindings(&["nonsense".to_string()]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut generate_args = args(
            dir.path().join("in.xlsx"),
            "{x}",
            PathBuf::from("/tmp/cmdgen/out.txt"),
        );
        generate_args.sheet = Some("BSC".into());

        let config = apply_overrides(Config::default(), &generate_args);
        assert_eq!(config.sheet.as_deref(), Some("BSC"));
        assert_eq!(config.output_path(), PathBuf::from("/tmp/cmdgen/out.txt"));
        assert!(!config.print_commands);
    }
}
