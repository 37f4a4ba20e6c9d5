use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    botforge completions bash > ~/.bash_completion.d/botforge\n\n\
                  Generate zsh completions:\n    botforge completions zsh > ~/.zfunc/_botforge\n\n\
                  Generate fish completions:\n    botforge completions fish > ~/.config/fish/completions/botforge.fish\n\n\
                  Generate PowerShell completions:\n    botforge completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
