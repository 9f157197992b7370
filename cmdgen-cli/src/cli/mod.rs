//! Command line front end

mod args;
pub mod commands;

pub use args::{Cli, Commands, GenerateArgs, TemplateSource};

use anyhow::Result;

use crate::config::Config;

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::handle_generate_command(args, config),
        Commands::Vars { template } => commands::vars::handle_vars_command(&template),
        Commands::Columns { file, sheet } => {
            let sheet = sheet.or_else(|| config.sheet.clone());
            commands::columns::handle_columns_command(&file, sheet.as_deref())
        }
    }
}
