//! Botforge - corebot extension scaffolder
//!
//! A command line tool that scaffolds extension projects for the corebot
//! chat-bot framework, builds the framework core from a branch snapshot and
//! links the built core into the new project as a local dev dependency.

use clap::Parser;

mod archive;
mod build;
mod cli;
mod commands;
mod error;
mod framework;
mod link;
mod location;
mod manager;
mod manifest;
mod net;
mod process;
mod progress;
mod scaffold;

use cli::{Cli, Commands};
use error::BotforgeError;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create(args) => commands::create::run(args, cli.verbose),
        Commands::Update(args) => commands::update::run(args, cli.verbose),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        if matches!(e, BotforgeError::Cancelled) {
            println!("Cancelled.");
            return;
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
