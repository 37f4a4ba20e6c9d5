//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - create: Create command arguments
//! - update: Update command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod create;
pub mod update;

pub use completions::CompletionsArgs;
pub use create::CreateArgs;
pub use update::UpdateArgs;

/// Botforge - corebot extension scaffolder
///
/// Create corebot extension projects and wire them to a freshly built framework core.
#[derive(Parser, Debug)]
#[command(
    name = "botforge",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Scaffold corebot extensions and link them against a local core build",
    long_about = "Botforge scaffolds new corebot extension projects, downloads a snapshot of the \
                  framework source, builds its core package with bun or pnpm, and links the \
                  freshly built core into the new project as a local dev dependency.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  botforge create                        \x1b[90m# Interactive scaffolding\x1b[0m\n   \
                  botforge create weather-report --yes   \x1b[90m# Non-interactive, defaults accepted\x1b[0m\n   \
                  botforge create my-tool --skip-build   \x1b[90m# Scaffold only, no core build\x1b[0m\n   \
                  botforge update                        \x1b[90m# Rebuild core, relink projects\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new extension project
    Create(CreateArgs),

    /// Rebuild the framework core and relink existing projects
    Update(UpdateArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_create() {
        let cli = Cli::try_parse_from(["botforge", "create", "weather-report"]).unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, Some("weather-report".to_string()));
                assert!(!args.yes);
                assert!(!args.skip_build);
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_cli_parsing_create_no_name() {
        let cli = Cli::try_parse_from(["botforge", "create"]).unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, None);
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_cli_parsing_update() {
        let cli = Cli::try_parse_from(["botforge", "update"]).unwrap();
        assert!(matches!(cli.command, Commands::Update(_)));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["botforge", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_verbose() {
        let cli = Cli::try_parse_from(["botforge", "-v", "update"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["botforge", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
