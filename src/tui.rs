use crate::event::Event;
use crate::pomodoro::Countdown;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use std::io;
use thiserror::Error;
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    Terminal,
};

mod animation;
mod render;
mod widgets;

const BUTTON_WIDTH: u16 = 11;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_GAP: u16 = 2;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: EventStream,
    layout: Option<ScreenLayout>,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl Tui {
    pub fn new() -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());

        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            events: EventStream::new(),
            layout: None,
            alternate_screen_enabled: false,
            raw_mode_enabled: false,
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors that have to be catched.
    /// Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        crossterm::terminal::enable_raw_mode().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        )
        .map_err(TuiError::AlternateScreenToggle)?;
        self.alternate_screen_enabled = true;

        tracing::debug!("terminal ui enabled");
        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::terminal::LeaveAlternateScreen,
                crossterm::event::DisableMouseCapture,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            crossterm::terminal::disable_raw_mode().map_err(TuiError::RawModeToggle)?;
            self.raw_mode_enabled = false;
        }

        tracing::debug!("terminal ui disabled");
        Ok(())
    }

    pub fn render(&mut self, clock_view: &ClockView) -> Result<(), TuiError> {
        let mut layout = None;
        self.terminal
            .draw(|f| {
                layout = Some(render::render_ui(f, clock_view));
            })
            .map_err(TuiError::Rendering)?;
        self.layout = layout;

        Ok(())
    }

    /// Waits for the next input that means something to the app. Cancel safe.
    pub async fn read_event(&mut self) -> Result<Event, TuiError> {
        loop {
            let crossterm_event = self
                .events
                .next()
                .await
                .ok_or(TuiError::InputStreamClosed)?
                .map_err(TuiError::ReadInputEvent)?;

            if let Some(event) = translate_event(&crossterm_event, self.layout.as_ref()) {
                return Ok(event);
            }
        }
    }
}

/// What the window shows, derived from the countdown after every change.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockView {
    pub timer_text: String,
    pub mode_label: String,
    pub is_running: bool,
    pub progress_percentage: f64,
}

impl From<&Countdown> for ClockView {
    fn from(countdown: &Countdown) -> Self {
        Self {
            timer_text: countdown.time_remaining(),
            mode_label: format!("mode: {}", countdown.mode()),
            is_running: countdown.is_running(),
            progress_percentage: countdown.progress_percentage(),
        }
    }
}

/// Where things were drawn, needed to map mouse clicks back to buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub window: Rect,
    pub clock: Rect,
    pub start_button: Rect,
    pub reset_button: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let inner = area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)])
            .split(inner);
        let (clock, button_row) = (rows[0], rows[1]);

        let button_row = widgets::centered(
            button_row,
            2 * BUTTON_WIDTH + BUTTON_GAP,
            BUTTON_HEIGHT,
        );
        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Length(BUTTON_GAP),
                Constraint::Length(BUTTON_WIDTH),
            ])
            .split(button_row);

        Self {
            window: area,
            clock,
            start_button: buttons[0],
            reset_button: buttons[2],
        }
    }

    fn button_at(&self, column: u16, row: u16) -> Option<Event> {
        if contains(&self.start_button, column, row) {
            Some(Event::Start)
        } else if contains(&self.reset_button, column, row) {
            Some(Event::Reset)
        } else {
            None
        }
    }
}

fn contains(rect: &Rect, column: u16, row: u16) -> bool {
    (rect.left()..rect.right()).contains(&column) && (rect.top()..rect.bottom()).contains(&row)
}

fn translate_event(event: &CrosstermEvent, layout: Option<&ScreenLayout>) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => translate_key(key_event),
        CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => layout.and_then(|layout| layout.button_at(*column, *row)),
        CrosstermEvent::Resize(..) => Some(Event::Resize),
        _ => None,
    }
}

fn translate_key(key_event: &KeyEvent) -> Option<Event> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => Some(Event::Quit),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Char('s') | KeyCode::Enter => Some(Event::Start),
        KeyCode::Char('r') => Some(Event::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed")]
    InputStreamClosed,
}
