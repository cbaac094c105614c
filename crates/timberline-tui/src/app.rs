//! Application state and main loop

use crate::action::Action;
use crate::components::{Component, LogsComponent};
use crate::ingest::IngestEvent;
use crate::tui::{self, Tui};
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Main application state
pub struct App {
    /// Whether the application should quit
    should_quit: bool,
    /// Level of the last row selected with enter, printed at exit
    selection: Option<String>,
    /// The log table component
    logs: LogsComponent,
    /// Tick rate for periodic redraws (ms)
    tick_rate: Duration,
    /// Hand-off channel from the ingestion loop
    ingest_rx: mpsc::Receiver<IngestEvent>,
    /// Set once the ingestion channel has drained and closed
    ingest_done: bool,
}

impl App {
    pub fn new(ingest_rx: mpsc::Receiver<IngestEvent>) -> Self {
        Self {
            should_quit: false,
            selection: None,
            logs: LogsComponent::new(),
            tick_rate: Duration::from_millis(100),
            ingest_rx,
            ingest_done: false,
        }
    }

    /// Run the application; returns the level selected with enter, if any
    pub async fn run(&mut self) -> Result<Option<String>> {
        // Install panic hook
        tui::install_panic_hook();

        // Initialize terminal
        let mut terminal = tui::init()?;

        // Main loop
        let result = self.main_loop(&mut terminal).await;

        // Restore terminal
        tui::restore()?;

        result.map(|()| self.selection.take())
    }

    /// Main event loop
    ///
    /// Processes exactly one event per iteration - a key, an ingested
    /// record, or a tick - then redraws. The logs component is only ever
    /// mutated here, so no locking is needed anywhere.
    async fn main_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.tick_rate);

        loop {
            // Draw current state
            terminal.draw(|frame| {
                let _ = self.logs.draw(frame, frame.area());
            })?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = self.logs.handle_key_event(key)? {
                            self.handle_action(action)?;
                        }
                    }
                    Some(Ok(Event::Resize(w, h))) => {
                        self.handle_action(Action::Resize(w, h))?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => {}
                },
                // One record at a time; the sender blocks until this side
                // takes delivery, which is the backpressure bound
                maybe_ingest = self.ingest_rx.recv(), if !self.ingest_done => {
                    match maybe_ingest {
                        Some(event) => self.logs.apply(event),
                        None => self.ingest_done = true,
                    }
                },
                _ = ticker.tick() => {
                    self.handle_action(Action::Tick)?;
                }
            }

            // Check if we should quit
            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action bubbled from a component
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Select(level) => {
                tracing::info!("Row selected with level {level}");
                self.selection = Some(level);
            }
            Action::Tick | Action::Resize(..) => {
                if let Some(next_action) = self.logs.update(action)? {
                    self.handle_action(next_action)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timberline_core::LogRecord;

    fn app() -> App {
        let (_tx, rx) = mpsc::channel(1);
        App::new(rx)
    }

    #[test]
    fn quit_action_stops_the_loop() {
        let mut app = app();
        assert!(!app.should_quit);
        app.handle_action(Action::Quit).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn select_action_records_the_level() {
        let mut app = app();
        app.handle_action(Action::Select("WARN".to_string())).unwrap();
        assert_eq!(app.selection.as_deref(), Some("WARN"));
    }

    #[test]
    fn tick_and_resize_are_absorbed() {
        let mut app = app();
        app.handle_action(Action::Tick).unwrap();
        app.handle_action(Action::Resize(80, 24)).unwrap();
        assert!(!app.should_quit);
        assert!(app.selection.is_none());
    }

    #[tokio::test]
    async fn ingested_records_follow_to_the_newest_row() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let (tx, rx) = mpsc::channel(1);
        let mut app = App::new(rx);

        let sender = tokio::spawn(async move {
            for level in ["INFO", "WARN", "ERROR"] {
                let record = LogRecord {
                    level: level.to_string(),
                    ..Default::default()
                };
                tx.send(IngestEvent::Record(record)).await.unwrap();
            }
        });

        // Drive the channel side of the loop directly
        for _ in 0..3 {
            let event = app.ingest_rx.recv().await.unwrap();
            app.logs.apply(event);
        }
        sender.await.unwrap();

        // Follow mode left the cursor on the newest record
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let action = app.logs.handle_key_event(enter).unwrap();
        assert_eq!(action, Some(Action::Select("ERROR".to_string())));
    }
}
