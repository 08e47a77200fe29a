mod ui;

use clap::Parser;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
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
};
use tracing::{debug, error, warn};

use tecla::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TrainerEvent},
    Catalog, Difficulty, Language, SessionConfig, Text, Trainer,
};

/// Duration for a custom prompt when no `--seconds` is given
const DEFAULT_PROMPT_SECS: u32 = 30;

/// line-by-line typing trainer with per-second speed charts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type sample texts line by line against the clock, then review a per-second chart of your speed and mistakes."
)]
pub struct Cli {
    /// language of the sample texts
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// hard mode throws away the whole line on a rejected key
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// treat upper and lower case as the same character
    #[clap(long)]
    ignore_case: bool,

    /// let up to three mistakes in a row through instead of blocking
    #[clap(long)]
    allow_errors: bool,

    /// number of seconds to run the test (defaults to the text's own duration)
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// custom single-line prompt to type instead of the built-in texts
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// path to a config.json with default settings
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file
    fn session_config(&self, file: &Config) -> SessionConfig {
        let mut config = SessionConfig::from(file);
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if self.ignore_case {
            config.case_sensitive = false;
        }
        if self.allow_errors {
            config.allow_errors = true;
        }
        if self.seconds.is_some() {
            config.duration_secs = self.seconds;
        }
        config
    }

    fn load_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        store.load()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

/// What the loop should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub trainer: Trainer,
    pub state: AppState,
    /// Last problem worth showing to the user
    pub message: Option<String>,
}

impl App {
    pub fn new(cli: &Cli, file_config: &Config) -> Result<Self, Box<dyn Error>> {
        let config = cli.session_config(file_config);
        let trainer = match &cli.prompt {
            Some(prompt) => {
                let text = Text::single_line(
                    "custom",
                    prompt.clone(),
                    config.duration_secs.unwrap_or(DEFAULT_PROMPT_SECS),
                );
                Trainer::with_text(config, text)
            }
            None => Trainer::new(config, Catalog::embedded()?)?,
        };

        Ok(Self {
            trainer,
            state: AppState::Typing,
            message: None,
        })
    }

    fn sync_state(&mut self) {
        self.state = if self.trainer.has_finished() {
            AppState::Results
        } else {
            AppState::Typing
        };
    }

    fn report<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => self.message = None,
            Err(e) => {
                warn!(error = %e, "action failed");
                self.message = Some(e.to_string());
            }
        }
    }

    pub fn on_tick(&mut self) {
        if self.trainer.is_running() {
            self.trainer.on_tick();
            self.sync_state();
        }
    }

    /// Dispatch one loop event. Keys catch the sampler up inside
    /// `Trainer::write`; every other wake-up polls it here.
    pub fn on_event(&mut self, event: TrainerEvent) -> Flow {
        match event {
            TrainerEvent::Key(key) => {
                if self.on_key(key) {
                    Flow::Quit
                } else {
                    Flow::Redraw
                }
            }
            TrainerEvent::Tick => {
                let was_running = self.trainer.is_running();
                self.on_tick();
                if was_running {
                    Flow::Redraw
                } else {
                    Flow::Continue
                }
            }
            TrainerEvent::Resize => {
                self.on_tick();
                Flow::Redraw
            }
            TrainerEvent::Paste(chars) => {
                self.on_tick();
                self.on_paste(chars);
                Flow::Redraw
            }
        }
    }

    /// Returns true when the app should quit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Left => self.trainer.restart(),
            KeyCode::Right => {
                let result = self.trainer.reset();
                self.report(result);
            }
            KeyCode::Tab if !self.trainer.is_running() => {
                let next = self.trainer.config().language.next();
                let result = self.trainer.set_language(next);
                self.report(result);
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                match self.state {
                    AppState::Typing => match self.trainer.write(c) {
                        Ok(_) => self.message = None,
                        Err(e) => {
                            error!(error = %e, "cannot start session");
                            self.message = Some(e.to_string());
                        }
                    },
                    AppState::Results => self.on_results_key(c),
                }
            }
            _ => {}
        }

        self.sync_state();
        false
    }

    fn on_results_key(&mut self, c: char) {
        let result = match c {
            'r' => {
                self.trainer.restart();
                Ok(())
            }
            'n' => self.trainer.reset(),
            'l' => {
                let next = self.trainer.config().language.next();
                self.trainer.set_language(next)
            }
            'd' => self
                .trainer
                .update_config(|cfg| cfg.difficulty = cfg.difficulty.toggled()),
            'c' => self
                .trainer
                .update_config(|cfg| cfg.case_sensitive = !cfg.case_sensitive),
            'e' => self
                .trainer
                .update_config(|cfg| cfg.allow_errors = !cfg.allow_errors),
            _ => Ok(()),
        };
        self.report(result);
    }

    pub fn on_paste(&mut self, chars: usize) {
        debug!(chars, "paste rejected");
        self.message = Some(format!("paste ignored ({chars} chars), type it instead"));
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        use clap::{error::ErrorKind, CommandFactory};
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        logging::init(&log_path)?;
    }

    let file_config = cli.load_config();
    let mut app = App::new(&cli, &file_config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match app.on_event(runner.step()) {
            Flow::Quit => break,
            Flow::Redraw => {
                terminal.draw(|f| ui(app, f))?;
            }
            Flow::Continue => {}
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}
