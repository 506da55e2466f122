use crate::tui::widgets::{BlockWithLegend, Button, PomodoroClock};
use crate::tui::{ClockView, ScreenLayout};
use tui::{
    backend::Backend,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{BorderType, Borders},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;

pub const WINDOW_TITLE: &str = "pomodoro clock";
pub const START_LABEL: &str = "start";
pub const RESET_LABEL: &str = "reset";

fn split_initial(str: &str) -> (&str, &str) {
    let mut graphemes = str.graphemes(true);

    let initial = graphemes.next().unwrap_or("");
    let remainder = graphemes.as_str();

    (initial, remainder)
}

fn text_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn initial_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Highlights the first grapheme, which doubles as the keyboard shortcut.
fn with_highlighted_initial(str: &str) -> Spans<'_> {
    let (initial, remainder) = split_initial(str);

    Spans::from(vec![
        Span::styled(initial, initial_style()),
        Span::styled(remainder, text_style()),
    ])
}

fn window_block<'a>() -> BlockWithLegend<'a> {
    BlockWithLegend::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Spans::from(Span::styled(WINDOW_TITLE, text_style())))
        .legend(vec![
            with_highlighted_initial(START_LABEL),
            with_highlighted_initial(RESET_LABEL),
            with_highlighted_initial("quit"),
        ])
}

pub fn render_ui<B: Backend>(frame: &mut Frame<B>, clock_view: &ClockView) -> ScreenLayout {
    let layout = ScreenLayout::new(frame.size());

    frame.render_widget(window_block(), layout.window);

    let clock = PomodoroClock::default()
        .timer_text(&clock_view.timer_text)
        .mode_label(&clock_view.mode_label)
        .progress_percentage(clock_view.progress_percentage)
        .is_running(clock_view.is_running);
    frame.render_widget(clock, layout.clock);

    let start_border = if clock_view.is_running {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    frame.render_widget(
        Button::new(with_highlighted_initial(START_LABEL)).border_style(start_border),
        layout.start_button,
    );
    frame.render_widget(
        Button::new(with_highlighted_initial(RESET_LABEL)),
        layout.reset_button,
    );

    layout
}
