//! Line charts over the precomputed statistics, drawn with ratatui on the
//! terminal's alternate screen.

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph};
use ratatui::{Frame, Terminal};
use std::io;

use crate::stats::CollisionStats;

pub const CRIMSON: Color = Color::Rgb(220, 20, 60);
pub const NAVY: Color = Color::Rgb(0, 0, 128);

const MUTED: Color = Color::Gray;

/// An ordered `(category, count)` series plus how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color: Color,
    /// Marker drawn on each data point.
    pub marker: Marker,
    pub points: Vec<(String, usize)>,
}

impl LineChart {
    /// Crashes per month, January through December.
    pub fn monthly_trend(stats: &CollisionStats) -> Self {
        Self {
            title: format!("Monthly Motor Vehicle Collisions in NYC ({})", stats.year),
            x_label: "Month",
            y_label: "Number of Accidents",
            color: CRIMSON,
            marker: Marker::Dot,
            points: stats
                .monthly_series()
                .map(|(month, count)| (month.to_string(), count))
                .collect(),
        }
    }

    /// Vehicle types in descending count order, or `None` if there are none.
    pub fn vehicle_ranking(stats: &CollisionStats) -> Option<Self> {
        if stats.vehicle_type_counts.is_empty() {
            return None;
        }

        Some(Self {
            title: format!("Vehicle Types Involved in NYC Collisions ({})", stats.year),
            x_label: "Vehicle Type",
            y_label: "Number of Collisions",
            color: NAVY,
            marker: Marker::Dot,
            points: stats
                .vehicle_type_counts
                .iter()
                .map(|v| (v.name.clone(), v.count))
                .collect(),
        })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [chart_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let data: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, count))| (i as f64, *count as f64))
            .collect();
        let y_max = self.points.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as f64;
        let x_max = self.points.len().saturating_sub(1).max(1) as f64;

        let muted = Style::default().fg(MUTED);
        let series_style = Style::default().fg(self.color);

        let line = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(series_style)
            .data(&data);
        let markers = Dataset::default()
            .marker(self.marker)
            .graph_type(GraphType::Scatter)
            .style(series_style)
            .data(&data);

        let x_labels: Vec<Span> = self
            .points
            .iter()
            .map(|(name, _)| Span::styled(name.as_str(), muted))
            .collect();
        let y_labels = vec![
            Span::styled("0", muted),
            Span::styled(format!("{:.0}", y_max / 2.0), muted),
            Span::styled(format!("{y_max:.0}"), muted),
        ];

        let chart = Chart::new(vec![line, markers])
            .block(Block::bordered().title(Line::from(self.title.as_str()).centered()))
            .x_axis(
                Axis::default()
                    .title(Span::styled(self.x_label, muted))
                    .style(muted)
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(self.y_label, muted))
                    .style(muted)
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, chart_area);
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled("Press any key to return to the menu", muted)).centered(),
            ),
            hint_area,
        );
    }
}

/// Somewhere a chart can be shown. Returns once the user is done looking.
pub trait ChartDisplay {
    fn show(&mut self, chart: &LineChart) -> Result<()>;
}

/// Shows charts full-screen and blocks until a key is pressed.
#[derive(Debug, Default)]
pub struct TerminalChartDisplay;

impl ChartDisplay for TerminalChartDisplay {
    fn show(&mut self, chart: &LineChart) -> Result<()> {
        let _screen = AlternateScreen::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        loop {
            terminal.draw(|frame| chart.render(frame, frame.area()))?;
            // anything other than a key press (resize, focus) just redraws
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => break,
                _ => {}
            }
        }

        Ok(())
    }
}

/// Raw mode plus alternate screen, restored on drop.
struct AlternateScreen;

impl AlternateScreen {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self)
    }
}

impl Drop for AlternateScreen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}
