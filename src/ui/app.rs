//! Main TUI application state and logic

use crate::playback::{PlaybackError, PlaybackStatus, Session};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{self, SourceScrollState, StatusRenderData};

/// The main application state
pub struct App {
    /// Loaded playback session
    pub session: Session,

    /// Whether the source pane is visible
    pub show_source: bool,

    pub source_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Time of the previous tick
    last_tick: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            show_source: true,
            source_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
            last_tick: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let now = Instant::now();
            self.session.tick(now.duration_since(self.last_tick));
            self.last_tick = now;

            // Poll with a timeout so playback keeps moving without input
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, progress bar, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Console (bottom)
        let console_area = if self.show_source {
            let left_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(columns[0]);

            let step = self.session.current_step();
            panes::render_source_pane(
                frame,
                left_rows[0],
                self.session.source().unwrap_or_default(),
                step.and_then(|s| s.highlight_line),
                step.is_some_and(|s| s.is_in_constructor()),
                &mut self.source_scroll,
            );
            left_rows[1]
        } else {
            columns[0]
        };
        panes::render_console_pane(frame, console_area, self.session.console());

        // Right column: Steps | Class | Objects
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
            ])
            .split(columns[1]);

        let status = self.session.status();
        panes::render_steps_pane(
            frame,
            right_rows[0],
            self.session.active_trace(),
            self.session.state().current_step_index,
            matches!(
                status,
                PlaybackStatus::ObjectComplete | PlaybackStatus::AllComplete
            ),
        );
        panes::render_class_pane(
            frame,
            right_rows[1],
            self.session.model().map(|m| &m.class),
        );
        panes::render_objects_pane(frame, right_rows[2], &self.session);

        let label = self
            .session
            .current_step()
            .filter(|_| matches!(status, PlaybackStatus::Stepping(_)))
            .map(|s| s.label.clone())
            .unwrap_or_default();
        let progress = if matches!(status, PlaybackStatus::Stepping(_)) {
            self.session.state().step_progress
        } else {
            0.0
        };
        panes::render_progress_bar(frame, main_chunks[1], progress, &label);

        let state = self.session.state();
        panes::render_status_bar(
            frame,
            main_chunks[2],
            &StatusRenderData {
                message: &self.status_message,
                status,
                object_index: state.current_object_index,
                object_count: self.session.sites().len(),
                step_count: self.session.active_trace().map_or(0, |t| t.len()),
                auto_play: state.auto_play,
                paused: state.paused,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') | KeyCode::Right => {
                self.status_message = match self.session.advance() {
                    PlaybackStatus::ObjectComplete => "Object complete".to_string(),
                    PlaybackStatus::AllComplete => "All objects constructed".to_string(),
                    PlaybackStatus::Ready => "Next object".to_string(),
                    _ => "Stepped forward".to_string(),
                };
            }
            KeyCode::Left => self.step_backward(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                let result = self.session.jump_to_step(index);
                self.report(result, format!("Jumped to step {}", index + 1));
            }
            KeyCode::Char('a') => {
                let on = !self.session.state().auto_play;
                self.session.set_auto_play(on);
                self.status_message = if on { "Auto-play on" } else { "Auto-play off" }.to_string();
            }
            KeyCode::Char('p') => {
                let on = !self.session.state().paused;
                self.session.set_paused(on);
                self.status_message = if on { "Paused" } else { "Resumed" }.to_string();
            }
            KeyCode::Char('r') => {
                self.session.restart();
                self.status_message = "Restarted".to_string();
            }
            KeyCode::Char('c') => {
                self.show_source = !self.show_source;
            }
            _ => {}
        }
    }

    /// Step back within the current object
    fn step_backward(&mut self) {
        let target = match self.session.status() {
            PlaybackStatus::Stepping(i) if i > 0 => Some(i - 1),
            PlaybackStatus::ObjectComplete => {
                self.session.active_trace().and_then(|t| t.len().checked_sub(1))
            }
            _ => None,
        };

        match target {
            Some(index) => {
                let result = self.session.jump_to_step(index);
                self.report(result, "Stepped backward".to_string());
            }
            None => self.status_message = "Cannot step backward".to_string(),
        }
    }

    fn report(&mut self, result: Result<(), PlaybackError>, success: String) {
        self.status_message = match result {
            Ok(()) => success,
            Err(e) => format!("Cannot jump: {}", e),
        };
    }
}
