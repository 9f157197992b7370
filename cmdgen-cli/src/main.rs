use clap::Parser;
use colored::*;
use is_terminal::IsTerminal;

use cmdgen::cli::{self, Cli};

fn main() {
    // Allow RUST_LOG and CMDGEN_CONFIG to come from a .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    if args.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    init_logging(args.verbose);

    if let Err(err) = cli::run(args) {
        eprintln!("{} {:#}", "Error:".bright_red().bold(), err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
