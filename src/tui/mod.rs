//! Ratatui-based terminal UI.
//!
//! The TUI provides a file-selection screen for choosing a CSV, then runs the
//! classification batch on a worker thread and renders a live progress gauge,
//! the results table, and the run summary.
//!
//! The worker communicates through the channel returned by
//! `batch::spawn_batch`; the event loop drains pending events once per poll
//! tick, so progress updates are coalesced and the display never blocks the
//! worker.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Terminal,
};

use crate::batch::{spawn_batch, BatchEvent, BatchOutput};
use crate::cli::AnalyzeArgs;
use crate::domain::{ConfidenceTier, Sentiment};
use crate::error::AppError;
use crate::io::ingest::{self, LoadedTable};

/// Start the TUI.
pub fn run(args: AnalyzeArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
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

enum Screen {
    /// Choosing a CSV from the discovered list.
    Pick,
    /// A table is loaded; analysis has not started.
    Loaded,
    /// Worker thread is classifying; gauge is live.
    Analyzing,
    /// Batch finished; results table is shown.
    Results,
}

struct App {
    screen: Screen,
    files: Vec<PathBuf>,
    file_cursor: usize,
    table: Option<LoadedTable>,
    batch_rx: Option<Receiver<BatchEvent>>,
    progress: f64,
    output: Option<BatchOutput>,
    result_cursor: usize,
    status: String,
}

impl App {
    fn new(args: AnalyzeArgs) -> Self {
        let mut app = Self {
            screen: Screen::Pick,
            files: crate::cli::picker::discover_csv_files(),
            file_cursor: 0,
            table: None,
            batch_rx: None,
            progress: 0.0,
            output: None,
            result_cursor: 0,
            status: "Select a CSV file.".to_string(),
        };

        if let Some(path) = args.file {
            app.load_file(path);
        } else if app.files.is_empty() {
            app.status =
                "No .csv files found under the current directory. q to quit.".to_string();
        }

        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            // Drain worker events first: progress updates arrive without any
            // terminal event and coalesce to the latest fraction seen.
            if self.drain_batch_events() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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

    /// Pull everything the worker has sent so far. Returns true when the
    /// visible state changed.
    fn drain_batch_events(&mut self) -> bool {
        let Some(rx) = self.batch_rx.take() else {
            return false;
        };

        let mut changed = false;
        loop {
            match rx.try_recv() {
                Ok(BatchEvent::Progress(fraction)) => {
                    self.progress = fraction;
                    changed = true;
                }
                Ok(BatchEvent::Finished(output)) => {
                    self.progress = 1.0;
                    self.output = Some(output);
                    self.result_cursor = 0;
                    self.screen = Screen::Results;
                    self.status = "Analysis complete.".to_string();
                    return true;
                }
                Ok(BatchEvent::Failed(err)) => {
                    self.screen = Screen::Loaded;
                    self.status = err.to_string();
                    return true;
                }
                Err(TryRecvError::Empty) => {
                    self.batch_rx = Some(rx);
                    return changed;
                }
                Err(TryRecvError::Disconnected) => {
                    self.screen = Screen::Loaded;
                    self.status = "Analysis worker stopped unexpectedly.".to_string();
                    return true;
                }
            }
        }
    }

    /// Returns true to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Char('q') {
            return true;
        }

        match self.screen {
            Screen::Pick => self.handle_pick_key(code),
            Screen::Loaded => self.handle_loaded_key(code),
            Screen::Analyzing => {} // batch runs to completion
            Screen::Results => self.handle_results_key(code),
        }
        false
    }

    fn handle_pick_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                self.file_cursor = self.file_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.file_cursor + 1 < self.files.len() {
                    self.file_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(path) = self.files.get(self.file_cursor).cloned() {
                    self.load_file(path);
                }
            }
            KeyCode::Char('r') => {
                self.files = crate::cli::picker::discover_csv_files();
                self.file_cursor = 0;
                self.status = format!("Found {} CSV file(s).", self.files.len());
            }
            _ => {}
        }
    }

    fn handle_loaded_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Enter => self.start_analysis(),
            KeyCode::Char('o') => self.back_to_pick(),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) {
        let len = self.output.as_ref().map(|o| o.results.len()).unwrap_or(0);
        match code {
            KeyCode::Up => {
                self.result_cursor = self.result_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.result_cursor + 1 < len {
                    self.result_cursor += 1;
                }
            }
            KeyCode::PageUp => {
                self.result_cursor = self.result_cursor.saturating_sub(10);
            }
            KeyCode::PageDown => {
                if len > 0 {
                    self.result_cursor = (self.result_cursor + 10).min(len - 1);
                }
            }
            KeyCode::Char('a') => self.start_analysis(),
            KeyCode::Char('o') => self.back_to_pick(),
            _ => {}
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        match ingest::load_records(&path) {
            Ok(table) => {
                self.status = if table.is_empty() {
                    // Empty input: load succeeded, but the batch step is not offered.
                    format!("Loaded {} — the file has no data rows.", table.file_name())
                } else if table.row_errors.is_empty() {
                    format!(
                        "Loaded {} record(s) from {}. Press a to analyze.",
                        table.records.len(),
                        table.file_name()
                    )
                } else {
                    format!(
                        "Loaded {} record(s) from {} ({} row error(s)). Press a to analyze.",
                        table.records.len(),
                        table.file_name(),
                        table.row_errors.len()
                    )
                };
                self.table = Some(table);
                self.output = None;
                self.screen = Screen::Loaded;
            }
            Err(err) => {
                // Distinct load diagnostics surface right here in the status line.
                self.status = err.to_string();
                self.screen = Screen::Pick;
            }
        }
    }

    fn start_analysis(&mut self) {
        let Some(table) = &self.table else {
            self.status = "No file loaded.".to_string();
            return;
        };
        if table.is_empty() {
            self.status = "The file has no data rows; there is nothing to classify.".to_string();
            return;
        }

        self.progress = 0.0;
        self.output = None;
        self.batch_rx = Some(spawn_batch(table.records.clone()));
        self.screen = Screen::Analyzing;
        self.status = "Classifying...".to_string();
    }

    fn back_to_pick(&mut self) {
        self.screen = Screen::Pick;
        self.table = None;
        self.output = None;
        self.status = "Select a CSV file.".to_string();
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        match self.screen {
            Screen::Pick => self.draw_pick(frame, chunks[1]),
            Screen::Loaded => self.draw_loaded(frame, chunks[1]),
            Screen::Analyzing => self.draw_analyzing(frame, chunks[1]),
            Screen::Results => self.draw_results(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("senti", Style::default().fg(Color::Cyan)),
            Span::raw(" — CSV sentiment screen"),
        ]));

        let file = self
            .table
            .as_ref()
            .map(|t| t.file_name())
            .unwrap_or_else(|| "-".to_string());
        let records = self
            .table
            .as_ref()
            .map(|t| t.records.len().to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!("file: {file} | records: {records}"),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_pick(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .files
            .iter()
            .map(|p| ListItem::new(p.display().to_string()))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Choose a CSV").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if !self.files.is_empty() {
            state.select(Some(self.file_cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_loaded(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(table) = &self.table else {
            return;
        };

        let mut lines = vec![
            Line::from(format!("File: {}", table.path.display())),
            Line::from(format!("Column: {}", table.column_name)),
            Line::from(format!("Records: {}", table.records.len())),
        ];
        if table.is_empty() {
            lines.push(Line::from(Span::styled(
                "The file has no data rows; analysis is not available.",
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from("Press a (or Enter) to analyze."));
        }
        for row_error in table.row_errors.iter().take(5) {
            lines.push(Line::from(Span::styled(
                format!("line {}: {}", row_error.line, row_error.message),
                Style::default().fg(Color::Red),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Loaded").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_analyzing(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let gauge = Gauge::default()
            .block(Block::default().title("Classifying").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(self.progress.clamp(0.0, 1.0));
        frame.render_widget(gauge, chunks[0]);
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(output) = &self.output else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let rows: Vec<Row> = output
            .results
            .iter()
            .map(|result| {
                let c = &result.classification;
                Row::new(vec![
                    Cell::from(result.record.line.to_string()),
                    Cell::from(result.record.text_or_empty().to_string()),
                    Cell::from(c.sentiment.display_name())
                        .style(Style::default().fg(sentiment_color(c.sentiment))),
                    Cell::from(c.tier.display_name()).style(tier_style(c.tier)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(24),
                Constraint::Length(10),
                Constraint::Length(18),
            ],
        )
        .header(
            Row::new(vec!["line", "text", "sentiment", "confidence"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().title("Results").borders(Borders::ALL));

        let mut state = TableState::default();
        state.select(Some(self.result_cursor));
        frame.render_stateful_widget(table, chunks[0], &mut state);

        let summary = &output.summary;
        let rate = summary
            .accuracy_percent()
            .map(|pct| {
                format!(
                    "strong confidence: {} / {} ({pct:.2}%)",
                    summary.strong_count, summary.total
                )
            })
            .unwrap_or_else(|| "strong confidence: N/A".to_string());
        let line = Line::from(vec![
            Span::raw(format!("total: {}", summary.total)),
            Span::raw(" | "),
            Span::styled(rate, Style::default().fg(Color::Green)),
            Span::raw(" | "),
            Span::raw(format!("elapsed: {:.2}s", summary.duration.as_secs_f64())),
        ]);
        let p = Paragraph::new(line).block(Block::default().title("Summary").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.screen {
            Screen::Pick => "↑/↓ select  Enter load  r rescan  q quit",
            Screen::Loaded => "a analyze  o other file  q quit",
            Screen::Analyzing => "q quit",
            Screen::Results => "↑/↓ scroll  a re-run  o other file  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral => Color::Gray,
        Sentiment::NotApplicable => Color::DarkGray,
    }
}

fn tier_style(tier: ConfidenceTier) -> Style {
    match tier {
        ConfidenceTier::Strong => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
        ConfidenceTier::Moderate => Style::default().fg(Color::Yellow),
        ConfidenceTier::Low => Style::default().fg(Color::LightRed),
        ConfidenceTier::NotApplicable => Style::default().fg(Color::DarkGray),
    }
}
