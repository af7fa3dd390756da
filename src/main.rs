//! Fixturegen CLI entry point.

use clap::Parser;
use fixturegen::cli::{self, Cli, Commands, GenerateArgs, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate(args)) => cli::run_generate(&args),
        Some(Commands::Init(args)) => cli::run_init(&args),
        None => cli::run_generate(&GenerateArgs::default()),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
