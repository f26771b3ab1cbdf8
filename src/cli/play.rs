//! Play command implementation - interactive TUI game on a world map.

use super::output::{
    format_outcome, format_status, game_over_message, CHOOSE_CITY, GAME_OVER_TITLE,
};
use super::{CliError, GameArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use geoquiz::{Coordinate, Phase, RoundEngine};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use std::io::stdout;
use std::time::Duration;

/// Where the cursor starts: the Alps-Adriatic region the default catalog covers.
const START_POSITION: Coordinate = Coordinate::new(46.676_528_8, 14.682_289_4);

/// Initial width of the visible map in degrees of longitude.
const START_LON_SPAN: f64 = 60.0;

/// Narrowest zoom in degrees of longitude.
const MIN_LON_SPAN: f64 = 7.5;

/// Widest zoom: the whole world.
const MAX_LON_SPAN: f64 = 360.0;

/// Cursor steps per visible map width.
const STEPS_PER_VIEW: f64 = 60.0;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the TUI fails.
pub(crate) fn execute(args: &GameArgs) -> Result<(), CliError> {
    let catalog = args.load_catalog()?;
    let config = args.config()?;
    let seed = args.seed();
    tracing::info!(seed, cities = catalog.len(), "Starting TUI game");

    let app = App::new(RoundEngine::seeded(catalog, seed, config));
    run_tui(app)
}

/// App state for the TUI.
struct App {
    engine: RoundEngine,
    cursor: Coordinate,
    lon_span: f64,
    message: Option<String>,
}

impl App {
    fn new(engine: RoundEngine) -> Self {
        Self {
            engine,
            cursor: START_POSITION,
            lon_span: START_LON_SPAN,
            message: None,
        }
    }

    /// Degrees the cursor moves per key press at the current zoom.
    fn step(&self) -> f64 {
        self.lon_span / STEPS_PER_VIEW
    }

    fn move_cursor(&mut self, dlat: f64, dlon: f64) {
        let lat = (self.cursor.lat + dlat).clamp(-90.0, 90.0);
        let mut lon = self.cursor.lon + dlon;
        if lon > 180.0 {
            lon -= 360.0;
        } else if lon < -180.0 {
            lon += 360.0;
        }
        self.cursor = Coordinate::new(lat, lon);
    }

    fn zoom_in(&mut self) {
        self.lon_span = (self.lon_span / 2.0).max(MIN_LON_SPAN);
    }

    fn zoom_out(&mut self) {
        self.lon_span = (self.lon_span * 2.0).min(MAX_LON_SPAN);
    }

    fn place(&mut self) {
        self.engine.pick_target();
        self.message = None;
    }

    fn guess(&mut self) {
        self.message = match self.engine.submit_guess(self.cursor) {
            Ok(state) => format_outcome(state),
            Err(_) => Some(CHOOSE_CITY.to_string()),
        };
    }

    fn restart(&mut self) {
        self.engine.restart();
        self.message = None;
    }

    /// Visible map bounds as `([min_lon, max_lon], [min_lat, max_lat])`.
    ///
    /// The view follows the cursor but never leaves the world rectangle.
    fn view_bounds(&self) -> ([f64; 2], [f64; 2]) {
        let lon_half = self.lon_span / 2.0;
        let lat_half = (self.lon_span / 4.0).min(90.0);
        let lon_center = self.cursor.lon.clamp(-180.0 + lon_half, 180.0 - lon_half);
        let lat_center = self.cursor.lat.clamp(-90.0 + lat_half, 90.0 - lat_half);
        (
            [lon_center - lon_half, lon_center + lon_half],
            [lat_center - lat_half, lat_center + lat_half],
        )
    }

    /// Handle a key press. Returns `false` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.engine.state().phase() == Phase::GameOver {
            // The game-over dialog only offers restart.
            match code {
                KeyCode::Char('q') | KeyCode::Esc => return false,
                KeyCode::Char('r') | KeyCode::Enter => self.restart(),
                _ => {}
            }
            return true;
        }

        let step = self.step();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(step, 0.0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(-step, 0.0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0.0, -step),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0.0, step),
            KeyCode::Char('K') => self.move_cursor(step * 5.0, 0.0),
            KeyCode::Char('J') => self.move_cursor(-step * 5.0, 0.0),
            KeyCode::Char('H') => self.move_cursor(0.0, -step * 5.0),
            KeyCode::Char('L') => self.move_cursor(0.0, step * 5.0),
            KeyCode::Char('+' | '=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            KeyCode::Char('p') => self.place(),
            KeyCode::Enter | KeyCode::Char(' ') => self.guess(),
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
        true
    }
}

fn run_tui(app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), CliError> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key.code)
        {
            break;
        }
    }

    tracing::info!(score = app.engine.state().score(), "Leaving TUI game");
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], app);
    render_side_panel(f, main_chunks[1], app);
    render_footer(f, chunks[2], app);

    if app.engine.state().phase() == Phase::GameOver {
        render_game_over(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let target = match state.target_city() {
        Some(city) => format!("Select the location of {}", city.name),
        None => "Press [p] to place a city".to_string(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", format_status(state)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(target, Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" geoquiz "));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let (x_bounds, y_bounds) = app.view_bounds();
    let cursor = app.cursor;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" Map "))
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            if let [target, guess] = state.markers() {
                ctx.draw(&CanvasLine {
                    x1: guess.coordinate.lon,
                    y1: guess.coordinate.lat,
                    x2: target.coordinate.lon,
                    y2: target.coordinate.lat,
                    color: Color::Gray,
                });
                for (marker, color) in [(target, Color::Red), (guess, Color::Yellow)] {
                    ctx.draw(&Points {
                        coords: &[(marker.coordinate.lon, marker.coordinate.lat)],
                        color,
                    });
                    ctx.print(
                        marker.coordinate.lon,
                        marker.coordinate.lat,
                        Line::styled(format!(" {}", marker.title()), Style::default().fg(color)),
                    );
                }
            }

            ctx.print(
                cursor.lon,
                cursor.lat,
                Line::styled(
                    "+",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            );
        });

    f.render_widget(canvas, area);
}

fn render_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let state = app.engine.state();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Cursor", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("  {}", app.cursor)),
        Line::from(format!("  Zoom: {:.0}° wide", app.lon_span)),
        Line::from(""),
    ];

    if let Some(message) = &app.message {
        let color = match state.last_outcome() {
            Some(outcome) if outcome.is_hit() => Color::Green,
            Some(_) => Color::Red,
            None => Color::Yellow,
        };
        lines.push(Line::from(Span::styled(
            "Last guess",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(color),
        )));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Round "))
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.state().phase() == Phase::GameOver {
        " [r] Restart  [q] Quit "
    } else {
        " [←↑↓→/hjkl] Move  [HJKL] Fast  [+/-] Zoom  [p] Place  [Enter] Guess  [r] Restart  [q] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn render_game_over(f: &mut Frame, app: &App) {
    let area = centered_rect(40, 7, f.area());
    let body = vec![
        Line::from(""),
        Line::from(game_over_message(app.engine.state().score())),
        Line::from(""),
        Line::from(Span::styled("[r] Restart", Style::default().fg(Color::Cyan))),
    ];

    let dialog = Paragraph::new(body)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {GAME_OVER_TITLE} "))
                .style(Style::default().fg(Color::White).bg(Color::Black)),
        );

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
