mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use typeforge::{
    config::{Config, ConfigStore, FileConfigStore},
    content::{ContentProvider, CorpusProvider, StaticProvider},
    logging,
    mode::{cycle_preset, TestMode, DURATION_PRESETS, WORD_COUNT_PRESETS},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner},
    session::{Phase, SessionConfig, SessionKey, TypingSession},
    TypeForgeError,
};

const TICK_RATE_MS: u64 = 100;

/// typing speed trainer with time, words and code modes
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed trainer for the terminal. Type random words against the clock, a fixed number of words, or a code snippet with auto-indent, and get wpm, accuracy and consistency when you finish."
)]
pub struct Cli {
    /// test mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<TestMode>,

    /// number of seconds to run a timed test
    #[clap(short = 's', long, value_parser = clap::value_parser!(u64).range(1..))]
    duration: Option<u64>,

    /// number of words in a words test
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// custom text to type instead of random words or snippets
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(short = 'v', long)]
    verbose: bool,

    /// log filter, e.g. `trace` or `typeforge=debug`
    #[clap(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Command line options win over the saved configuration
    fn session_config(&self, saved: &Config) -> SessionConfig {
        let mut config = SessionConfig::from(saved);
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(secs) = self.duration {
            config.duration_secs = secs;
        }
        if let Some(count) = self.words {
            config.word_count = count.max(1);
        }
        config
    }

    fn content_provider(&self) -> Result<Box<dyn ContentProvider>, Box<dyn Error>> {
        Ok(match self.prompt.as_deref() {
            Some(prompt) if prompt.trim().is_empty() => {
                return Err(TypeForgeError::Config("--prompt needs some text to type".into()).into())
            }
            Some(prompt) => Box::new(StaticProvider::from_prompt(prompt)),
            None => Box::new(CorpusProvider::embedded()?),
        })
    }
}

#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: SessionConfig, provider: Box<dyn ContentProvider>) -> Self {
        Self {
            session: TypingSession::new(config, provider),
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.session.phase() {
            Phase::Finished => match key.code {
                KeyCode::Tab | KeyCode::Enter | KeyCode::Char('r') => {
                    self.session.on_key(SessionKey::Tab)
                }
                _ => {}
            },
            Phase::Idle | Phase::Running => match key.code {
                KeyCode::Tab => self.session.on_key(SessionKey::Tab),
                KeyCode::Enter => self.session.on_key(SessionKey::Enter),
                KeyCode::Backspace => self.session.backspace(),
                KeyCode::Left | KeyCode::Right if self.session.phase() == Phase::Idle => {
                    let mode = self.session.mode();
                    let mode = if key.code == KeyCode::Right {
                        mode.next()
                    } else {
                        mode.prev()
                    };
                    self.session.configure(mode, None, None);
                }
                KeyCode::Up | KeyCode::Down if self.session.phase() == Phase::Idle => {
                    self.cycle_preset(key.code == KeyCode::Up)
                }
                KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
                KeyCode::Char(c) => self.session.type_char(c),
                _ => {}
            },
        }
    }

    pub fn on_tick(&mut self) {
        self.session.on_tick();
    }

    fn cycle_preset(&mut self, forward: bool) {
        let config = *self.session.config();
        match config.mode {
            TestMode::Time => {
                let secs = cycle_preset(&DURATION_PRESETS, config.duration_secs, forward);
                self.session.configure(TestMode::Time, Some(secs), None);
            }
            TestMode::Words => {
                let count = cycle_preset(&WORD_COUNT_PRESETS, config.word_count, forward);
                self.session.configure(TestMode::Words, None, Some(count));
            }
            TestMode::Code => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.as_deref() {
        logging::init_file_logging(path, cli.verbose, cli.log_level.as_deref())?;
    }

    let store = FileConfigStore::new();
    let saved = store.load();
    let mut app = App::new(cli.session_config(&saved), cli.content_provider()?);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let run_result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // a custom prompt is a one-off, only remember the settings
    if let Err(err) = store.save(&Config::from(app.session.config())) {
        tracing::warn!(error = %err, "could not save config");
    }

    run_result
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, FixedTicker>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        let event = runner.step();
        let running = app.session.phase() == Phase::Running;
        // a steady stream of keys never yields a Tick, so the clock moves on every pass
        app.on_tick();

        match event {
            AppEvent::Tick => {
                // redraw only while the clock is visibly moving
                if running {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                app.on_key(key);
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}
