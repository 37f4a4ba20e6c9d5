use clap::Parser;

/// Arguments for the create command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Interactive scaffolding:\n    botforge create\n\n\
                   Scaffold with a name, prompt for the rest:\n    botforge create weather-report\n\n\
                   Fully non-interactive:\n    botforge create weather-report --yes\n\n\
                   Scaffold without building the core:\n    botforge create weather-report --skip-build")]
pub struct CreateArgs {
    /// Extension name in kebab-case. Prompted for when omitted
    pub name: Option<String>,

    /// Human-readable display name (defaults to the name with hyphens replaced by spaces)
    #[arg(long = "display-name", value_name = "NAME")]
    pub display_name: Option<String>,

    /// One-line extension description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Accept all defaults and skip confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Scaffold the project but skip the core build and link steps
    #[arg(long = "skip-build")]
    pub skip_build: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    #[test]
    fn test_cli_parsing_create_with_options() {
        let cli = super::super::Cli::try_parse_from([
            "botforge",
            "create",
            "weather-report",
            "--display-name",
            "Weather Report",
            "--description",
            "Daily weather tools",
            "--yes",
        ])
        .unwrap();
        match cli.command {
            super::super::Commands::Create(args) => {
                assert_eq!(args.name, Some("weather-report".to_string()));
                assert_eq!(args.display_name, Some("Weather Report".to_string()));
                assert_eq!(args.description, Some("Daily weather tools".to_string()));
                assert!(args.yes);
                assert!(!args.skip_build);
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_cli_parsing_create_skip_build() {
        let cli =
            super::super::Cli::try_parse_from(["botforge", "create", "my-tool", "--skip-build"])
                .unwrap();
        match cli.command {
            super::super::Commands::Create(args) => {
                assert!(args.skip_build);
            }
            _ => panic!("Expected Create command"),
        }
    }
}
