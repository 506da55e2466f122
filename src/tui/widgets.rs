use crate::tui::animation::{self, CLOCK_HEIGHT, CLOCK_WIDTH};
use std::iter::once;
use tui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub struct BlockWithLegend<'a> {
    legend: Vec<Spans<'a>>,
    block: Block<'a>,
    border_type: BorderType,
}

impl<'a> BlockWithLegend<'a> {
    pub fn title<T>(mut self, title: T) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.block = self.block.title(title);
        self
    }

    pub fn borders(mut self, borders: Borders) -> BlockWithLegend<'a> {
        self.block = self.block.borders(borders);
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> BlockWithLegend<'a> {
        self.block = self.block.border_type(border_type);
        self.border_type = border_type;
        self
    }

    pub fn legend<T>(mut self, legend: Vec<T>) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.legend = legend.into_iter().map(Into::into).collect();
        self
    }
}

impl<'a> Default for BlockWithLegend<'a> {
    fn default() -> BlockWithLegend<'a> {
        BlockWithLegend {
            legend: vec![],
            block: Block::default(),
            border_type: BorderType::Plain,
        }
    }
}

impl<'a> Widget for BlockWithLegend<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        self.block.render(area, buf);
        let symbols = BorderType::line_symbols(self.border_type);

        let legend_y = area.y + area.height - 1;
        let mut legend_x = area.x + 1;

        for entry in self.legend {
            let entry: Spans = once(Span::from(symbols.bottom_right))
                .chain(entry.0)
                .chain(once(Span::from(symbols.bottom_left)))
                .collect::<Vec<_>>()
                .into();

            let width_remaining = area.width.saturating_sub(legend_x - area.x + 1);
            let (x, _) = buf.set_spans(legend_x, legend_y, &entry, width_remaining);
            legend_x = x;
        }
    }
}

/// The countdown: a ring that empties as the current mode runs out, with the time and mode inside.
pub struct PomodoroClock<'a> {
    timer_text: &'a str,
    mode_label: &'a str,
    progress_percentage: f64,
    is_running: bool,
}

impl<'a> PomodoroClock<'a> {
    pub fn timer_text(mut self, timer_text: &'a str) -> PomodoroClock<'a> {
        self.timer_text = timer_text;
        self
    }

    pub fn mode_label(mut self, mode_label: &'a str) -> PomodoroClock<'a> {
        self.mode_label = mode_label;
        self
    }

    pub fn progress_percentage(mut self, progress_percentage: f64) -> PomodoroClock<'a> {
        self.progress_percentage = progress_percentage.clamp(0.0, 1.0);
        self
    }

    pub fn is_running(mut self, is_running: bool) -> PomodoroClock<'a> {
        self.is_running = is_running;
        self
    }
}

impl<'a> Default for PomodoroClock<'a> {
    fn default() -> PomodoroClock<'a> {
        PomodoroClock {
            timer_text: "",
            mode_label: "",
            progress_percentage: 0.0,
            is_running: false,
        }
    }
}

impl<'a> Widget for PomodoroClock<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let clock_area = centered(area, CLOCK_WIDTH, CLOCK_HEIGHT);

        Paragraph::new(animation::clock(1.0 - self.progress_percentage))
            .alignment(Alignment::Left)
            .render(clock_area, buf);

        let status_text = format!(
            "{}\n{}\n{}",
            self.timer_text,
            self.mode_label,
            if self.is_running { "⏵" } else { "⏸" }
        );

        let text_area = clock_area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });
        let text_height = status_text.lines().count() as u16;
        let top_padding = (text_area.height / 2).saturating_sub(text_height / 2);

        let text_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(top_padding), Constraint::Min(0)])
            .split(text_area)[1];

        Paragraph::new(status_text)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}

/// A bordered, clickable label.
pub struct Button<'a> {
    label: Spans<'a>,
    border_style: Style,
}

impl<'a> Button<'a> {
    pub fn new<T>(label: T) -> Button<'a>
    where
        T: Into<Spans<'a>>,
    {
        Button {
            label: label.into(),
            border_style: Style::default(),
        }
    }

    pub fn border_style(mut self, style: Style) -> Button<'a> {
        self.border_style = style;
        self
    }
}

impl<'a> Widget for Button<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style);
        let label_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.label)
            .alignment(Alignment::Center)
            .render(label_area, buf);
    }
}

/// The `width` × `height` rectangle centered in `area`, shrunk to fit if `area` is too small.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_places_rect_in_the_middle() {
        let area = Rect::new(2, 4, 41, 21);

        assert_eq!(centered(area, 21, 11), Rect::new(12, 9, 21, 11));
    }

    #[test]
    fn centered_shrinks_to_small_areas() {
        let area = Rect::new(0, 0, 10, 5);

        assert_eq!(centered(area, 21, 11), area);
    }
}
