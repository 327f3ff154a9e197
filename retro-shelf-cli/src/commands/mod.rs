pub(crate) mod enrich;
pub(crate) mod import;
pub(crate) mod item;
pub(crate) mod list;
pub(crate) mod nuke;
pub(crate) mod platform;
pub(crate) mod stats;
pub(crate) mod sync;

use std::io::Write;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::CliError;

/// Ask a yes/no question; only "y"/"yes" counts as yes.
pub(crate) fn confirm(prompt: &str) -> Result<bool, CliError> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Spinner shown while a network operation is in flight.
pub(crate) fn network_spinner(msg: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Format a price for display.
pub(crate) fn format_price(price: f64) -> String {
    format!("{price:.2}")
}
