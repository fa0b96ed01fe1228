use crate::models::TimelineSlot;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One secondary-metric cell: a label over a value, centered. Renders "--"
/// when no data is available.
pub struct MetricCell<'a> {
    label: &'a str,
    value: Option<String>,
}

impl<'a> MetricCell<'a> {
    pub fn new(label: &'a str, value: Option<String>) -> Self {
        Self { label, value }
    }
}

impl Widget for MetricCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }

        let (value, style) = match self.value {
            Some(v) => (v, Theme::normal()),
            None => ("--".to_string(), Theme::dim()),
        };

        let lines = vec![
            Line::from(Span::styled(self.label, Theme::dim())),
            Line::from(""),
            Line::from(Span::styled(value, style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// One timeline cell: condition text, icon glyph, time label, temperature.
pub struct TimelineCell<'a> {
    slot: &'a TimelineSlot,
}

impl<'a> TimelineCell<'a> {
    pub fn new(slot: &'a TimelineSlot) -> Self {
        Self { slot }
    }
}

impl Widget for TimelineCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 {
            return;
        }

        let temp = format!("{}°C", self.slot.temperature);
        let temp_style = ratatui::style::Style::default()
            .fg(Theme::temp_color(self.slot.temperature as f64));

        let lines = vec![
            Line::from(Span::styled(self.slot.condition.as_str(), Theme::normal())),
            Line::from(Span::styled(self.slot.category.symbol(), Theme::highlight())),
            Line::from(Span::styled(self.slot.label.as_str(), Theme::dim())),
            Line::from(Span::styled(temp, temp_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
