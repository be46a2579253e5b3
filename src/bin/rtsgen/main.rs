//! rtsgen CLI - Resolve per-board runtime library manifests

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rtsgen::resolver::ResolveError;
use rtsgen::util::diagnostic::emit;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<ResolveError>() {
            Some(err) => emit(&err.to_diagnostic(), io::stderr().is_terminal()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("rtsgen=debug")
    } else {
        EnvFilter::new("rtsgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    let global = commands::GlobalOpts {
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &global),
        Commands::Show(args) => commands::show::execute(args, &global),
        Commands::Boards(args) => commands::boards::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
