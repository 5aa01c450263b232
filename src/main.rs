//! Terminal entry point.
//!
//! This is the thin integration layer between the userdeck library and the
//! terminal. It parses the command line, sets up tracing, owns the raw-mode
//! screen and runs the event loop.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Event loop (main task)     │
//! │  ┌────────────────────────┐  │
//! │  │  AppState (library)    │  │  ← UI state, event handling
//! │  └────────────────────────┘  │
//! │      │ spawn      ▲ channel  │
//! │      ▼            │          │
//! │  ┌────────────────────────┐  │
//! │  │ DirectoryWorker tasks  │  │  ← Gateway calls
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! Key presses and worker responses are both turned into library [`Event`]s. Any
//! event that changes what is on screen triggers a full redraw.
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+c`: Quit
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Normal mode:
//! - `j`/`k`, `Down`/`Up`: Move selection
//! - `h`/`l`, `Left`/`Right`, `PageUp`/`PageDown`: Previous / next page
//! - `g`/`G`, `Home`/`End`: First / last page
//! - `1`-`5`: Sort by ID, name, email, phone, company (again to reverse)
//! - `+`/`-`: Page size
//! - `/`: Search, `f`: filter panel, `c`: clear filters
//! - `a`: Add, `e`/`Enter`: edit, `d`: delete, `u`: refresh selected user
//! - `r`: Reload, `x`: dismiss error, `q`: quit
//!
//! Search, filter panel and form:
//! - Characters are typed into the focused input
//! - `Tab`/`Shift+Tab`: Next / previous field
//! - `Enter`: Apply, `Esc`: cancel, `Del`: clear all filters (filter panel)
//!
//! Delete confirmation:
//! - `y`/`Enter`: Delete, `n`/`Esc`: keep

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};
use futures_util::StreamExt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use userdeck::app::modes::Column;
use userdeck::gateway::{DirectoryGateway, HttpGateway, InMemoryGateway};
use userdeck::worker::{DirectoryWorker, WorkerMessage, WorkerResponse};
use userdeck::{handle_event, Action, AppState, Config, ConfigOverrides, Event, InputMode, Result};

/// Browse and manage a REST-backed user directory.
#[derive(Debug, Parser)]
#[command(name = "userdeck", version, about)]
struct Cli {
    /// Config file (default: the platform config dir, e.g. ~/.config/userdeck/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Root URL of the users API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Use the bundled sample data instead of the network
    #[arg(long, conflicts_with = "fixture")]
    offline: bool,

    /// Use users from a JSON file instead of the network
    #[arg(long, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Built-in theme name
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Custom TOML theme file
    #[arg(long, value_name = "FILE")]
    theme_file: Option<String>,

    /// Initial rows per page
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Tracing filter (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    trace_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base_url: self.api_url.clone(),
            page_size: self.page_size,
            theme_name: self.theme.clone(),
            theme_file: self.theme_file.clone(),
            trace_level: self.trace_level.clone(),
        }
    }

    /// Picks the backend: `--fixture`, then `--offline`, then the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be read or decoded, or the HTTP
    /// client cannot be built.
    fn gateway(&self, config: &Config) -> Result<Arc<dyn DirectoryGateway>> {
        if let Some(path) = &self.fixture {
            tracing::debug!(fixture = %path.display(), "using fixture gateway");
            return Ok(Arc::new(InMemoryGateway::from_file(path)?));
        }
        if self.offline {
            tracing::debug!("using bundled sample data");
            return Ok(Arc::new(InMemoryGateway::sample()?));
        }
        tracing::debug!(api_base_url = %config.api_base_url, "using HTTP gateway");
        Ok(Arc::new(HttpGateway::from_config(config)?))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("userdeck: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?.apply_overrides(cli.overrides())?;

    let log_dir = userdeck::infrastructure::get_data_dir();
    let _tracing = match userdeck::observability::init_tracing(&config.trace_level, &log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("userdeck: tracing disabled: {e}");
            None
        }
    };

    let gateway = cli.gateway(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(Dashboard::new(&config, gateway).run())
}

/// Raw mode and the alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Whatever woke the event loop.
enum Input {
    Terminal(Option<io::Result<TermEvent>>),
    Worker(WorkerResponse),
}

/// Event loop state: the library's `AppState` plus the worker and its channel.
struct Dashboard {
    app: AppState,
    worker: DirectoryWorker,
    responses_tx: UnboundedSender<WorkerResponse>,
    responses_rx: UnboundedReceiver<WorkerResponse>,
}

impl Dashboard {
    fn new(config: &Config, gateway: Arc<dyn DirectoryGateway>) -> Self {
        let app = userdeck::initialize(config);
        let worker = DirectoryWorker::new(app.store.clone(), gateway);
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        Self {
            app,
            worker,
            responses_tx,
            responses_rx,
        }
    }

    async fn run(mut self) -> Result<()> {
        let _terminal = TerminalGuard::enter()?;
        let mut events = EventStream::new();

        {
            let _span = tracing::debug_span!("dashboard_start").entered();
            self.post_worker_message(WorkerMessage::load_users());
        }
        self.draw()?;

        loop {
            let input = tokio::select! {
                term = events.next() => Input::Terminal(term),
                Some(response) = self.responses_rx.recv() => Input::Worker(response),
                else => break,
            };

            let event = match input {
                Input::Terminal(Some(Ok(TermEvent::Key(key)))) if key.kind == KeyEventKind::Press => {
                    match self.map_key_event(&key) {
                        Some(event) => event,
                        None => continue,
                    }
                }
                Input::Terminal(Some(Ok(TermEvent::Resize(..)))) => {
                    self.draw()?;
                    continue;
                }
                Input::Terminal(Some(Ok(_))) => continue,
                Input::Terminal(Some(Err(e))) => return Err(e.into()),
                Input::Terminal(None) => break,
                Input::Worker(response) => Event::WorkerResponse(response),
            };

            if self.update(&event)? {
                break;
            }
        }

        tracing::debug!("dashboard exiting");
        Ok(())
    }

    /// Handles one event, runs the resulting actions and redraws if needed.
    ///
    /// # Parameters
    ///
    /// * `event` - Mapped key event or a worker response
    ///
    /// # Returns
    ///
    /// `true` when the dashboard should exit.
    fn update(&mut self, event: &Event) -> Result<bool> {
        let span = tracing::debug_span!("dashboard_update_event", event = ?event);
        let _guard = span.entered();

        let (should_render, actions) = match handle_event(&mut self.app, event) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                return Ok(false);
            }
        };
        tracing::debug!(action_count = actions.len(), should_render, "event handled");

        for action in actions {
            match action {
                Action::Quit => return Ok(true),
                Action::PostToWorker(message) => self.post_worker_message(message),
            }
        }

        if should_render {
            self.draw()?;
        }
        Ok(false)
    }

    fn post_worker_message(&self, message: WorkerMessage) {
        tracing::debug!(message_type = message.name(), "posting message to worker");
        // The task reports back through the channel; its handle is not needed.
        drop(self.worker.spawn(message, self.responses_tx.clone()));
    }

    fn draw(&self) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let frame = userdeck::ui::render(&self.app, usize::from(rows), usize::from(cols));

        let mut stdout = io::stdout().lock();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Translates a key press for the current input mode.
    ///
    /// # Returns
    ///
    /// The event to handle, or `None` for keys with no binding in this mode.
    fn map_key_event(&self, key: &KeyEvent) -> Option<Event> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Event::Quit),
                KeyCode::Char('n') => Some(Event::MoveDown),
                KeyCode::Char('p') => Some(Event::MoveUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key.code),
            InputMode::Search => Some(match key.code {
                KeyCode::Down => Event::MoveDown,
                KeyCode::Up => Event::MoveUp,
                KeyCode::Enter => Event::Confirm,
                KeyCode::Esc => Event::Cancel,
                KeyCode::Backspace => Event::Backspace,
                KeyCode::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::FilterPanel | InputMode::UserForm => Some(match key.code {
                KeyCode::Tab | KeyCode::Down => Event::NextField,
                KeyCode::BackTab | KeyCode::Up => Event::PreviousField,
                KeyCode::Enter => Event::Confirm,
                KeyCode::Esc => Event::Cancel,
                KeyCode::Backspace => Event::Backspace,
                KeyCode::Delete if self.app.input_mode == InputMode::FilterPanel => Event::ClearFilters,
                KeyCode::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Event::Confirm),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Event::Cancel),
                _ => None,
            },
        }
    }

    fn map_normal_key(code: KeyCode) -> Option<Event> {
        Some(match code {
            KeyCode::Down | KeyCode::Char('j') => Event::MoveDown,
            KeyCode::Up | KeyCode::Char('k') => Event::MoveUp,
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => Event::NextPage,
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => Event::PreviousPage,
            KeyCode::Home | KeyCode::Char('g') => Event::FirstPage,
            KeyCode::End | KeyCode::Char('G') => Event::LastPage,
            KeyCode::Char('+' | '=') => Event::GrowPageSize,
            KeyCode::Char('-') => Event::ShrinkPageSize,
            KeyCode::Char('/') => Event::SearchMode,
            KeyCode::Char('f') => Event::OpenFilterPanel,
            KeyCode::Char('c') => Event::ClearFilters,
            KeyCode::Char('a') => Event::AddUser,
            KeyCode::Char('e') | KeyCode::Enter => Event::EditUser,
            KeyCode::Char('d') => Event::DeleteUser,
            KeyCode::Char('u') => Event::RefreshUser,
            KeyCode::Char('r') => Event::Reload,
            KeyCode::Char('x') => Event::DismissError,
            KeyCode::Esc => Event::Cancel,
            KeyCode::Char('q') => Event::Quit,
            KeyCode::Char(digit @ '1'..='5') => Event::SortBy(Column::from_digit(digit)?),
            _ => return None,
        })
    }
}
