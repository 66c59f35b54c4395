mod app;
mod client;
mod config;
mod effects;
mod grid;
mod item;
mod messages;
mod modal;
mod page;
mod router;
mod search;
mod ui;

use app::{App, Focus, Move};
use clap::{Parser, Subcommand};
use client::CatalogClient;
use config::Config;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::execute;
use effects::EffectRunner;
use messages::EventChannel;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal client for browsing and searching a plant catalog site
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root URL of the catalog site
    #[arg(short, long)]
    base_url: Option<String>,

    /// Page to open first, relative to the base URL
    #[arg(short, long)]
    start: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file (defaults to the platform cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog (default)
    Run,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print where the config file lives
    Path,
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => Ok(path),
        None => Config::default_path(),
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Config { action } => {
            let config_path = match config_path {
                Ok(path) => path,
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            };
            match action {
                ConfigAction::Path => {
                    println!("{}", config_path.display());
                }
                ConfigAction::Init { force } => {
                    if config_path.exists() && !force {
                        eprintln!(
                            "Error: {} already exists (use --force to overwrite)",
                            config_path.display()
                        );
                        std::process::exit(1);
                    }
                    Config::default().save_to(&config_path)?;
                    eprintln!("Wrote {}", config_path.display());
                }
            }
        }
        Commands::Run => {
            init_logging(cli.log_file.clone(), cli.verbose)?;

            let mut config = match Config::load_or_default(config_path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            };
            if let Some(base_url) = cli.base_url {
                config.base_url = base_url;
            }
            if let Some(start) = cli.start {
                config.start_path = start;
            }

            let client = match CatalogClient::new(
                &config.base_url,
                &config.search_path,
                config.request_timeout(),
            ) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            };
            tracing::info!(base_url = %client.base_url(), "starting");

            let channel = EventChannel::new();
            let runner = EffectRunner::new(
                client.clone(),
                channel.tx.clone(),
                config.open_command.clone(),
            );
            let mut app = App::new(client.base_url().clone());

            // Init terminal
            let mut terminal = ratatui::init();
            execute!(std::io::stdout(), EnableMouseCapture)?;

            let size = terminal.size()?;
            app.resize(size.width, size.height);
            if let Some(effect) = app.start(&config.start_path) {
                runner.run(effect);
            }

            // Main loop
            let result = run_app(&mut terminal, &mut app, &channel, &runner);

            // Restore terminal
            let _ = execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();

            if let Err(e) = result {
                tracing::error!(error = %e, "exiting on error");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_logging(log_file: Option<PathBuf>, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = match log_file {
        Some(path) => path,
        None => config::project_dirs()
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(std::env::temp_dir)
            .join("plant-explorer.log"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;

    // The TUI owns stdout, so everything goes to the file
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("PLANT_EXPLORER_LOG")
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    channel: &EventChannel,
    runner: &EffectRunner,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Completed fetches first, so this frame shows them
        for ev in channel.drain() {
            if let Some(effect) = app.handle_event(ev) {
                runner.run(effect);
            }
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            let effect = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
                    MouseEventKind::ScrollDown if app.modal.is_open() => {
                        app.modal.scroll_down();
                        None
                    }
                    MouseEventKind::ScrollUp if app.modal.is_open() => {
                        app.modal.scroll_up();
                        None
                    }
                    _ => None,
                },
                Event::Resize(width, height) => {
                    app.resize(width, height);
                    None
                }
                _ => None,
            };
            if let Some(effect) = effect {
                runner.run(effect);
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Option<messages::Effect> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    // Search box swallows printable keys
    if app.focus == Focus::Search {
        return handle_search_key(app, key);
    }

    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return None;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return None;
    }

    if app.modal.is_open() {
        return handle_modal_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('m') => {
            app.toggle_menu();
            None
        }
        KeyCode::Char('/') => {
            app.focus_search();
            None
        }
        KeyCode::Char('b') | KeyCode::Backspace => app.back(),
        _ if app.focus == Focus::Menu => handle_menu_key(app, key),
        _ => handle_grid_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Option<messages::Effect> {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => {
            app.focus = Focus::Grid;
            None
        }
        KeyCode::Backspace => {
            app.search.input.pop();
            None
        }
        KeyCode::Char(c) => {
            app.search.input.push(c);
            None
        }
        _ => None,
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent) -> Option<messages::Effect> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_modal();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.modal.scroll_down();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.modal.scroll_up();
            None
        }
        KeyCode::Char('o') => app.open_model_externally(),
        _ => None,
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) -> Option<messages::Effect> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_prev();
            None
        }
        KeyCode::Enter => app.activate_link(app.menu_selected),
        KeyCode::Esc => {
            app.toggle_menu();
            None
        }
        _ => None,
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) -> Option<messages::Effect> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(Move::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(Move::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(Move::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(Move::Down),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
    None
}
