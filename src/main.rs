use crate::app::App;
use crate::args::{Args, Parser};
use crate::pomodoro::Countdown;
use std::process::ExitCode;

mod app;
mod args;
mod event;
mod logging;
mod pomodoro;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log_dir = args.log_dir.unwrap_or_else(logging::default_log_dir);
    let _log_guard = match logging::init_logging(&log_dir, &args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match App::new(Countdown::new()) {
        Ok(mut app) => app.run().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "app terminated");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
