use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const WORK_DURATION: u32 = 25 * 60;
pub const BREAK_DURATION: u32 = 5 * 60;
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining_seconds: u32,
    mode: Mode,
    is_running: bool,
}

impl Countdown {
    pub fn new() -> Countdown {
        Countdown {
            remaining_seconds: Mode::Work.duration(),
            mode: Mode::Work,
            is_running: false,
        }
    }

    /// Calling this on a running countdown is allowed, the caller is expected to restart its tick schedule.
    pub fn start(&mut self) {
        self.is_running = true;
    }

    /// Advances the countdown by one second.
    /// Reaching zero stops the countdown and switches to the other mode, which then has to be started again.
    /// Does not look at `is_running`, gating ticks is up to the tick source.
    pub fn tick(&mut self) -> TickOutcome {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds > 0 {
            return TickOutcome::Counted;
        }

        self.is_running = false;
        self.switch_mode();
        TickOutcome::ModeSwitched(self.mode)
    }

    pub fn switch_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.remaining_seconds = self.mode.duration();
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.mode = Mode::Work;
        self.remaining_seconds = Mode::Work.duration();
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn time_remaining(&self) -> String {
        format_time(self.remaining_seconds())
    }

    /// Elapsed share of the current mode, in `[0, 1]`.
    pub fn progress_percentage(&self) -> f64 {
        let duration = self.mode.duration();
        let elapsed = duration.saturating_sub(self.remaining_seconds);
        (f64::from(elapsed) / f64::from(duration)).clamp(0.0, 1.0)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new()
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.mode,
            self.time_remaining(),
            if self.is_running { "" } else { " ||" }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Counted,
    ModeSwitched(Mode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    pub fn duration(self) -> u32 {
        match self {
            Mode::Work => WORK_DURATION,
            Mode::Break => BREAK_DURATION,
        }
    }

    pub fn toggled(self) -> Mode {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Work => write!(f, "work"),
            Mode::Break => write!(f, "break"),
        }
    }
}

/// Renders seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}
