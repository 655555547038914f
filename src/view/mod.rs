//! TUI rendering and terminal management (impure shell)

mod layout;
mod select_popup;

pub use layout::{checkbox, column_heading, page_checkbox, paginator_text, render_layout, ViewConfig};
pub use select_popup::{centered_rect, render_select_popup};

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{KeyAction, PageIndex, RecordId};
use crate::source::{PageLoader, RecordProvider};
use crate::state::{AppState, Effect};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// How long to wait for terminal input before checking for fetched pages.
const TICK: Duration = Duration::from_millis(50);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    loader: PageLoader,
    key_bindings: KeyBindings,
    view: ViewConfig,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        provider: Arc<dyn RecordProvider>,
        config: &ResolvedConfig,
        start: PageIndex,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, provider, config, start))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app on an existing terminal and request the first page.
    pub fn with_terminal(
        terminal: Terminal<B>,
        provider: Arc<dyn RecordProvider>,
        config: &ResolvedConfig,
        start: PageIndex,
    ) -> Self {
        let mut app = Self {
            terminal,
            app_state: AppState::new(config.page_size),
            loader: PageLoader::new(provider),
            key_bindings: KeyBindings::default(),
            view: ViewConfig {
                title: config.title.clone(),
                columns: config.columns.clone(),
            },
        };
        app.execute(Effect::Load(start));
        app
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws after input and
    /// whenever a fetched page arrives.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
            }

            if self.poll_loads() {
                self.draw()?;
            }
        }
    }

    /// Apply any fetched pages. Returns true if something changed.
    fn poll_loads(&mut self) -> bool {
        let outcomes = self.loader.poll(self.app_state.page_store_mut());
        for outcome in &outcomes {
            self.app_state.on_load_outcome(outcome);
        }
        !outcomes.is_empty()
    }

    /// Handle a key press. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.app_state.select_input.is_open() {
            self.handle_select_input_key(key);
            return false;
        }

        match self.key_bindings.get(key) {
            Some(action) => {
                debug!(?action, "key action");
                let effect = self.app_state.handle_action(action);
                self.execute(effect)
            }
            None => false,
        }
    }

    fn handle_select_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.app_state.cancel_select_count(),
            KeyCode::Enter => self.app_state.submit_select_count(),
            KeyCode::Backspace => self.app_state.select_input_backspace(),
            KeyCode::Left => self.app_state.select_input_left(),
            KeyCode::Right => self.app_state.select_input_right(),
            KeyCode::Char(ch) => self.app_state.select_input_char(ch),
            _ => {}
        }
    }

    /// Carry out an effect. Returns true if the app should quit.
    fn execute(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Load(index) => {
                info!(page = %index, "navigating");
                self.loader.request(self.app_state.page_store_mut(), index);
                false
            }
            Effect::Quit => true,
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let view = &self.view;
        self.terminal.draw(|frame| {
            render_layout(frame, state, view);
        })?;
        Ok(())
    }

    /// Application state (read-only).
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Selected ids in ascending order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.app_state.selection().iter().collect()
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a key event (test-only accessor). Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Block until outstanding page fetches settle, then apply them.
    pub(crate) fn settle_test(&mut self) {
        let outcomes = self
            .loader
            .settle(self.app_state.page_store_mut(), Duration::from_secs(5));
        for outcome in &outcomes {
            self.app_state.on_load_outcome(outcome);
        }
    }

    /// Render one frame (test-only accessor).
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// The terminal, for inspecting the TestBackend buffer.
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails. Returns the ids selected when the user quit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_provider(
    provider: Arc<dyn RecordProvider>,
    config: &ResolvedConfig,
    start: PageIndex,
) -> Result<Vec<RecordId>, TuiError> {
    let mut app = TuiApp::new(provider, config, start)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result.map(|()| app.selected_ids())
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
