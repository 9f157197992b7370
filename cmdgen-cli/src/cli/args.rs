//! Command line argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cmdgen")]
#[command(about = "Generate commands from spreadsheet rows and a command template")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one command per spreadsheet row
    Generate(GenerateArgs),

    /// List the variables a template uses
    Vars {
        #[command(flatten)]
        template: TemplateSource,
    },

    /// Show the sheets and header columns of a spreadsheet
    Columns {
        /// Spreadsheet file (.xlsx or .xls)
        file: PathBuf,

        /// Sheet to inspect (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

/// Where the command template comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TemplateSource {
    /// Command template, e.g. "Mod Bscex:MSISDN={x},SMSRouterID={y};"
    #[arg(short, long)]
    pub template: Option<String>,

    /// Read the command template from a file
    #[arg(long)]
    pub template_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Spreadsheet file (.xlsx or .xls), or '-' to read it from stdin
    pub file: PathBuf,

    #[command(flatten)]
    pub template: TemplateSource,

    /// Sheet to read (defaults to the first sheet)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Read a variable from a differently named column (VAR=COLUMN)
    #[arg(short, long = "bind", value_name = "VAR=COLUMN")]
    pub bindings: Vec<String>,

    /// Where to write the commands file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File name used to detect the format when reading from stdin
    #[arg(long, default_value = "stdin.xlsx")]
    pub input_name: String,

    /// Do not echo the generated commands
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Whether the spreadsheet is read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }
}
