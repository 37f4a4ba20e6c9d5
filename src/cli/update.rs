use clap::Parser;

/// Arguments for the update command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Relink the project in the current directory:\n    botforge update\n\n\
                   Relink specific external plugins:\n    botforge update weather-report dice-roller\n\n\
                   Relink every discovered project without a menu:\n    botforge update --all")]
pub struct UpdateArgs {
    /// Project names to relink. Prompted for when omitted and several are found
    pub targets: Vec<String>,

    /// Relink all discovered projects without the interactive menu
    #[arg(long)]
    pub all: bool,
}
