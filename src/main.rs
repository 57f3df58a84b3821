//! Lipiantar - Roman Punjabi to Gurmukhi
//!
//! A terminal notes workspace that sends Romanized Punjabi to a language
//! model and lets the user review the Gurmukhi suggestion before accepting
//! it into their notes.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use lipiantar::application::{App, TranslationWorker};
use lipiantar::domain::{TranslationResult, TranslationService};
use lipiantar::infrastructure::{AppConfig, GeminiInvoker, NotesExporter};
use lipiantar::presentation::{render_ui, InputHandler, Services};

const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "lipiantar")]
#[command(about = "Roman Punjabi to Gurmukhi notes workspace", long_about = None)]
struct Cli {
    /// Config file (defaults to <data dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for config and logs
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the configured model name
    #[arg(long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Translate text once and print the result
    Translate {
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,

        /// Roman Punjabi text; multiple words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let data_dir = AppConfig::data_dir(cli.data_dir.as_deref())?;
    init_logging(&data_dir)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| AppConfig::config_path(&data_dir));

    if let Some(Command::InitConfig { force }) = &cli.command {
        init_config(&config_path, *force)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = AppConfig::load_from_file(&config_path)?;
    if let Some(model) = &cli.model {
        config.model.model = model.clone();
    }

    let invoker = GeminiInvoker::new(&config.model).context("Failed to create model client")?;
    let service = TranslationService::new(Arc::new(invoker));

    match cli.command {
        Some(Command::Translate { json, text }) => translate_once(&service, &text.join(" "), json),
        _ => {
            let services = Services {
                worker: TranslationWorker::new(service),
                exporter: NotesExporter::from_config(&config),
            };
            run_tui(services)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let log_path = data_dir.join("lipiantar.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    AppConfig::default().save_to_file(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn translate_once(service: &TranslationService, text: &str, json: bool) -> Result<ExitCode> {
    let result = service.translate(text);

    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        match &result {
            TranslationResult::Translated { gurmukhi_text } => println!("{gurmukhi_text}"),
            TranslationResult::Failed { error } => eprintln!("{error}"),
        }
    }

    Ok(match result {
        TranslationResult::Translated { .. } => ExitCode::SUCCESS,
        TranslationResult::Failed { .. } => ExitCode::FAILURE,
    })
}

fn run_tui(services: Services) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(services.worker.provider_name());
    tracing::info!("Starting with model {}", app.provider_name);
    let res = run_app(&mut terminal, &mut app, &services);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("Terminal error")
}

/// Main application event loop.
///
/// Drains finished translations, redraws, and polls for input every tick.
/// Continues running until the user presses 'q' with no review open.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, services: &Services) -> io::Result<()> {
    loop {
        while let Some(response) = services.worker.try_recv() {
            app.apply_translation(response);
        }
        app.tick();

        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.can_quit() => {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, services, key.code, key.modifiers),
                }
            }
        }
    }
}
