//! Ratatui-based chart viewer.
//!
//! Shows the resolved chart full-screen until the user quits. The grid and
//! error-bar layers can be toggled; the final state is returned so a PNG
//! saved afterwards matches what was on screen.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::chart::{ChartModel, Layers};
use crate::error::{AppError, EXIT_OUTPUT};

mod plotters_chart;

use plotters_chart::GrowthPlottersChart;

/// Show `model` until the user quits; returns the layers left enabled.
pub fn run(model: &ChartModel) -> Result<Layers, AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to initialize terminal: {e}")))?;

    let mut viewer = Viewer::new(model);
    viewer.event_loop(&mut terminal)?;
    Ok(viewer.layers)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_OUTPUT, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct Viewer<'a> {
    model: &'a ChartModel,
    layers: Layers,
    status: String,
}

impl<'a> Viewer<'a> {
    fn new(model: &'a ChartModel) -> Self {
        let n: usize = model.curves.iter().map(|c| c.points.len()).sum();
        Self {
            model,
            layers: Layers::default(),
            status: format!("{} series, {n} samples", model.curves.len()),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_OUTPUT, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the viewer should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('e') => {
                if self.model.has_error_bars() {
                    self.layers.error_bars = !self.layers.error_bars;
                    self.status = format!("error bars: {}", on_off(self.layers.error_bars));
                } else {
                    self.status = "no error data loaded (use --errors)".to_string();
                }
            }
            KeyCode::Char('g') => {
                self.layers.grid = !self.layers.grid;
                self.status = format!("grid: {}", on_off(self.layers.grid));
            }
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_chart(frame, chunks[0]);
        self.draw_footer(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = self.model.title.lines().collect::<Vec<_>>().join(" ");
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let widget = GrowthPlottersChart {
            model: self.model,
            layers: self.layers,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "e error bars  g grid  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}
