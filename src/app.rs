use crate::event::Event;
use crate::pomodoro::{Countdown, TickOutcome, TICK_PERIOD};
use crate::tui::{ClockView, Tui, TuiError};
use std::ops::Deref;
use thiserror::Error;
use tokio::select;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub struct App {
    countdown: Countdown,
    tui: Tui,
}

impl App {
    pub fn new(countdown: Countdown) -> Result<Self, UnrecoverableError> {
        let tui = Tui::new()?;

        Ok(Self { countdown, tui })
    }

    /// The terminal is restored on every path out of here, including a half-finished `enable`.
    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        if let Err(err) = self.tui.enable() {
            return first_error(Err(err.into()), self.tui.disable());
        }
        let result = self.run_inner().await;

        first_error(result, self.tui.disable())
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        let mut ticker = tick_source();

        loop {
            self.tui.render(&ClockView::from(&self.countdown))?;

            select! {
                _ = ticker.tick(), if self.countdown.is_running() => {
                    if let TickOutcome::ModeSwitched(mode) = self.countdown.tick() {
                        tracing::info!(%mode, "countdown reached zero, switched mode");
                    }
                }
                tui_event = self.tui.read_event() => {
                    let event = tui_event?;
                    if *handle_event(&mut self.countdown, event, &mut ticker) {
                        break;
                    }
                }
            }
        }

        tracing::info!(countdown = %self.countdown, "quitting");
        Ok(())
    }
}

/// First tick lands one full period from now, unlike `tokio::time::interval`.
fn tick_source() -> Interval {
    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// The error that happened first is returned, a failing terminal restore after it is only logged.
fn first_error(
    result: Result<(), UnrecoverableError>,
    restore: Result<(), TuiError>,
) -> Result<(), UnrecoverableError> {
    match (result, restore) {
        (Err(err), Err(restore_err)) => {
            tracing::error!(%restore_err, "failed to restore terminal");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restore) => restore.map_err(UnrecoverableError::from),
    }
}

fn handle_event(countdown: &mut Countdown, event: Event, ticker: &mut Interval) -> AppShouldQuit {
    match event {
        Event::Start => {
            countdown.start();
            ticker.reset();
            tracing::info!(%countdown, "countdown started");
        }
        Event::Reset => {
            countdown.reset();
            tracing::info!(%countdown, "countdown reset");
        }
        Event::Resize => (),
        Event::Quit => return AppShouldQuit(true),
    }

    AppShouldQuit(false)
}

struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::{Mode, WORK_DURATION};
    use std::io;
    use std::time::Duration;
    use tokio::time::{advance, timeout};

    fn io_error(msg: &str) -> io::Error {
        io::Error::new(io::ErrorKind::Other, msg.to_string())
    }

    /// Completes the next tick and reports how long after `since` it fired.
    async fn next_tick_after(ticker: &mut Interval, since: Instant) -> Duration {
        ticker.tick().await.duration_since(since)
    }

    #[tokio::test(start_paused = true)]
    async fn start_waits_a_full_period_before_the_first_tick() {
        let mut countdown = Countdown::new();
        let mut ticker = tick_source();

        advance(Duration::from_secs(10)).await;
        let started_at = Instant::now();
        handle_event(&mut countdown, Event::Start, &mut ticker);

        assert_eq!(next_tick_after(&mut ticker, started_at).await, TICK_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_restarts_the_schedule() {
        let mut countdown = Countdown::new();
        let mut ticker = tick_source();

        handle_event(&mut countdown, Event::Start, &mut ticker);
        advance(Duration::from_millis(400)).await;

        let restarted_at = Instant::now();
        handle_event(&mut countdown, Event::Start, &mut ticker);

        assert!(
            timeout(Duration::from_millis(999), ticker.tick()).await.is_err(),
            "tick fired on the old schedule"
        );
        assert_eq!(next_tick_after(&mut ticker, restarted_at).await, TICK_PERIOD);
    }

    #[test]
    fn run_error_wins_over_restore_error() {
        let result = first_error(
            Err(TuiError::Rendering(io_error("render")).into()),
            Err(TuiError::RawModeToggle(io_error("restore"))),
        );

        assert!(matches!(
            result,
            Err(UnrecoverableError::Tui(TuiError::Rendering(_)))
        ));
    }

    #[test]
    fn failed_enable_is_reported_after_restore() {
        let result = first_error(
            Err(TuiError::AlternateScreenToggle(io_error("enable")).into()),
            Ok(()),
        );

        assert!(matches!(
            result,
            Err(UnrecoverableError::Tui(TuiError::AlternateScreenToggle(_)))
        ));
    }

    #[test]
    fn restore_error_is_reported_after_clean_run() {
        let result = first_error(Ok(()), Err(TuiError::RawModeToggle(io_error("restore"))));

        assert!(matches!(
            result,
            Err(UnrecoverableError::Tui(TuiError::RawModeToggle(_)))
        ));
        assert!(first_error(Ok(()), Ok(())).is_ok());
    }

    #[tokio::test]
    async fn start_event_starts_countdown_and_keeps_running() {
        let mut countdown = Countdown::new();
        let mut ticker = tick_source();

        assert!(!*handle_event(&mut countdown, Event::Start, &mut ticker));
        assert!(countdown.is_running());

        assert!(!*handle_event(&mut countdown, Event::Start, &mut ticker));
        assert!(countdown.is_running());
        assert_eq!(countdown.remaining_seconds(), WORK_DURATION);
    }

    #[tokio::test]
    async fn reset_event_stops_and_restores_work_session() {
        let mut countdown = Countdown::new();
        let mut ticker = tick_source();
        countdown.start();
        countdown.switch_mode();

        assert!(!*handle_event(&mut countdown, Event::Reset, &mut ticker));
        assert_eq!(countdown, Countdown::new());
        assert_eq!(countdown.mode(), Mode::Work);
    }

    #[tokio::test]
    async fn resize_leaves_countdown_untouched() {
        let mut countdown = Countdown::new();
        let mut ticker = tick_source();
        countdown.start();
        let before = countdown.clone();

        assert!(!*handle_event(&mut countdown, Event::Resize, &mut ticker));
        assert_eq!(countdown, before);
    }

    #[tokio::test]
    async fn quit_event_ends_the_loop() {
        let mut countdown = Countdown::new();
        let mut ticker = tick_source();

        assert!(*handle_event(&mut countdown, Event::Quit, &mut ticker));
    }
}
