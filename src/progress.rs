//! Spinner display for long-running pipeline stages

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a child process or network stage runs
pub fn stage_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Finish a spinner, leaving no residue on the line
pub fn finish_spinner(pb: &ProgressBar) {
    pb.finish_and_clear();
}
