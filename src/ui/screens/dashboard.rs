use crate::models::{IconCategory, TimelineSlot, WeatherSnapshot};
use crate::ui::components::{InputWidget, MetricCell, TimelineCell};
use crate::ui::Theme;
use chrono::{DateTime, Local, Timelike};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// The single weather screen: current conditions up top, the four-point
/// timeline in the middle, secondary metrics below.
pub struct DashboardScreen<'a> {
    snapshot: Option<&'a WeatherSnapshot>,
    timeline: &'a [TimelineSlot],
    clock: DateTime<Local>,
    loading: bool,
    status_message: Option<&'a str>,
    search: Option<SearchOverlay<'a>>,
}

/// Search popup contents: the input buffer and an optional scoped error.
pub struct SearchOverlay<'a> {
    pub buffer: &'a str,
    pub error: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        snapshot: Option<&'a WeatherSnapshot>,
        timeline: &'a [TimelineSlot],
        clock: DateTime<Local>,
    ) -> Self {
        Self {
            snapshot,
            timeline,
            clock,
            loading: false,
            status_message: None,
            search: None,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    pub fn with_search(mut self, search: Option<SearchOverlay<'a>>) -> Self {
        self.search = search;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.loading && self.snapshot.is_none() {
            if area.height == 0 {
                return;
            }
            let para = Paragraph::new(Span::styled("Loading weather data...", Theme::dim()))
                .alignment(Alignment::Center);
            let y = area.y + area.height / 2;
            para.render(Rect::new(area.x, y, area.width, 1), buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Current conditions header
                Constraint::Length(6), // Timeline row
                Constraint::Length(5), // Metrics row
                Constraint::Min(0),
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_timeline(chunks[1], buf);
        self.render_metrics(chunks[2], buf);
        self.render_status_message(chunks[4], buf);
        self.render_nav(chunks[5], buf);

        if let Some(ref search) = self.search {
            render_search_popup(search, area, buf);
        }
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(inner);

        self.render_temp_and_place(columns[0], buf);
        self.render_clock(columns[1], buf);
        self.render_condition(columns[2], buf);
    }

    fn render_temp_and_place(&self, area: Rect, buf: &mut Buffer) {
        let lines = match self.snapshot {
            Some(snapshot) => {
                let temp = format!("{}°C", snapshot.current.temperature.round() as i32);
                let temp_style = Style::default()
                    .fg(Theme::temp_color(snapshot.current.temperature))
                    .add_modifier(ratatui::style::Modifier::BOLD);
                vec![
                    Line::from(""),
                    Line::from(Span::styled(temp, temp_style)),
                    Line::from(Span::styled(
                        snapshot.current.place_name.as_str(),
                        Theme::header(),
                    )),
                    Line::from(Span::styled("press / to search", Theme::dim())),
                ]
            }
            None => vec![
                Line::from(""),
                Line::from(Span::styled("--°C", Theme::dim())),
                Line::from(Span::styled("Unknown location", Theme::dim())),
                Line::from(Span::styled("press / to search", Theme::dim())),
            ],
        };

        Paragraph::new(lines).render(area, buf);
    }

    fn render_clock(&self, area: Rect, buf: &mut Buffer) {
        // 12-hour clock without the AM/PM marker, long-form date below.
        let (_, hour12) = self.clock.hour12();
        let time = format!("{:02}:{:02}", hour12, self.clock.minute());
        let date = self.clock.format("%B %-d, %Y").to_string();

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(time, Theme::title())),
            Line::from(Span::styled(date, Theme::dim())),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_condition(&self, area: Rect, buf: &mut Buffer) {
        let Some(snapshot) = self.snapshot else {
            return;
        };

        let category = IconCategory::classify(
            snapshot.current.condition_code,
            self.clock.hour(),
        );

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(category.symbol(), Theme::highlight())),
            Line::from(Span::styled(
                snapshot.current.condition_main.as_str(),
                Theme::normal(),
            )),
            Line::from(Span::styled(
                snapshot.current.condition_description.as_str(),
                Theme::dim(),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_timeline(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.timeline.is_empty() {
            let para = Paragraph::new(Span::styled("No forecast available", Theme::dim()))
                .alignment(Alignment::Center);
            para.render(inner, buf);
            return;
        }

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(inner);

        for (slot, cell) in self.timeline.iter().zip(cells.iter()) {
            TimelineCell::new(slot).render(*cell, buf);
        }
    }

    fn render_metrics(&self, area: Rect, buf: &mut Buffer) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let current = self.snapshot.map(|s| &s.current);

        let humidity = current.map(|c| format!("{}%", c.humidity));
        MetricCell::new("Humidity", humidity).render(cells[0], buf);

        let max_min = current.map(|c| {
            format!(
                "{}/{}°C",
                c.temp_max.round() as i32,
                c.temp_min.round() as i32
            )
        });
        MetricCell::new("Max/Min", max_min).render(cells[1], buf);

        let wind = current.map(|c| format!("{} m/s", c.wind_speed));
        MetricCell::new("Wind", wind).render(cells[2], buf);

        let pressure = current.map(|c| format!("{} hPa", c.pressure_hpa));
        MetricCell::new("Pressure", pressure).render(cells[3], buf);

        let feels_like = current.map(|c| format!("{}°C", c.feels_like.round() as i32));
        MetricCell::new("Feels Like", feels_like).render(cells[4], buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("failed") || msg.contains("unavailable") {
                Theme::warning()
            } else {
                Theme::success()
            };
            let para = Paragraph::new(Span::styled(msg, style));
            para.render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[/]", Theme::nav_key()),
            Span::styled("Search ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        let para = Paragraph::new(nav);
        para.render(area, buf);
    }
}

fn render_search_popup(search: &SearchOverlay<'_>, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(40, 5, area);
    Clear.render(popup, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .split(popup);

    InputWidget::new("Search City", search.buffer)
        .placeholder("Enter city name...")
        .focused(true)
        .render(chunks[0], buf);

    if let Some(error) = search.error {
        let para = Paragraph::new(Span::styled(error, Theme::error()));
        para.render(chunks[1], buf);
    } else {
        let para = Paragraph::new(Span::styled("Enter to search, Esc to close", Theme::dim()));
        para.render(chunks[1], buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
