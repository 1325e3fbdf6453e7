mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use intuit::{
    config::{Config, ConfigStore, FileConfigStore},
    feedback::{BellFeedback, FeedbackSink, NullFeedback},
    game::{FailurePolicy, Game, GameConfig},
    round::RandomRounds,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner, TICK_RATE_MS},
};

/// terminal intuition trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reflex mini-game for the terminal: a target number hides behind the center card; pick the matching choice card before the ten second clock runs out. Settings persist between runs and can be overridden per run from the flags below."
)]
pub struct Cli {
    /// number of choice cards per round (2 or 3)
    #[clap(short = 'c', long, value_parser = clap::value_parser!(u8).range(2..=3))]
    choices: Option<u8>,

    /// seconds on the round clock
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..=120))]
    seconds: Option<u32>,

    /// what a wrong pick or a timeout does to the session
    #[clap(short = 'p', long, value_enum)]
    policy: Option<FailurePolicy>,

    /// keep the target number visible during rounds (practice aid)
    #[clap(long)]
    peek: bool,

    /// disable sound feedback
    #[clap(long)]
    mute: bool,
}

impl Cli {
    /// Layer per-run flags over the persisted configuration
    fn apply(&self, config: &mut Config) {
        if let Some(choices) = self.choices {
            config.choice_count = choices as usize;
        }
        if let Some(seconds) = self.seconds {
            config.round_secs = seconds;
        }
        if let Some(policy) = self.policy {
            config.failure_policy = policy;
        }
        if self.peek {
            config.peek = true;
        }
        if self.mute {
            config.sound = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Game,
}

pub struct App {
    pub config: Config,
    pub store: FileConfigStore,
    pub game: Game,
    pub screen: Screen,
}

impl App {
    pub fn new(config: Config, store: FileConfigStore) -> Self {
        let game = build_game(&config);
        Self {
            config,
            store,
            game,
            screen: Screen::Intro,
        }
    }

    /// Fresh session from the current settings
    pub fn reset(&mut self) {
        self.game = build_game(&self.config);
    }

    fn save_config(&self) {
        // settings persistence is best-effort
        let _ = self.store.save(&self.config);
    }
}

fn build_game(config: &Config) -> Game {
    let rounds = Box::new(RandomRounds::new(config.choice_count));
    let feedback: Box<dyn FeedbackSink> = if config.sound {
        Box::new(BellFeedback)
    } else {
        Box::new(NullFeedback)
    };
    Game::new(GameConfig::from(config), rounds, feedback)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply(&mut config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, store);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => {
                if app.screen == Screen::Game {
                    app.game.on_tick();
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }

                match app.screen {
                    Screen::Intro => match key.code {
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            app.reset();
                            app.screen = Screen::Game;
                        }
                        KeyCode::Esc | KeyCode::Char('q') => break,
                        _ => {}
                    },
                    Screen::Game => {
                        if handle_game_key(app, key.code) {
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the app should quit
fn handle_game_key(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => return true,
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char(c @ '1'..='9') => {
            // card hotkeys are 1-based; the state machine ignores
            // out-of-range and out-of-phase picks
            app.game.select(c as usize - '1' as usize);
        }
        _ if app.game.is_over() => match code {
            KeyCode::Char('p') => {
                app.config.failure_policy = match app.config.failure_policy {
                    FailurePolicy::Terminal => FailurePolicy::Recoverable,
                    FailurePolicy::Recoverable => FailurePolicy::Terminal,
                };
                app.save_config();
            }
            KeyCode::Char('c') => {
                app.config.choice_count = if app.config.choice_count == 3 { 2 } else { 3 };
                app.save_config();
            }
            KeyCode::Char('m') => {
                app.config.sound = !app.config.sound;
                app.save_config();
            }
            _ => {}
        },
        _ => {}
    }
    false
}
