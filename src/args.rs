pub use clap::Parser;
use std::path::PathBuf;

/// A pomodoro clock: 25 minutes of work, 5 minutes of break.
///
/// Keys: s/enter start, r reset, q/esc quit. The buttons can be clicked, too.
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory to write the log file to [default: $XDG_STATE_HOME/pomoclock]
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "pomoclock=trace"; RUST_LOG takes precedence
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}
