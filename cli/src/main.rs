mod commands;
mod console;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use synergy_core::config::{AppConfig, default_builtin_dir, load_definitions};
use synergy_core::{AnnouncementSequencer, Engine};
use tracing_subscriber::filter::EnvFilter;

use console::ConsoleSurface;

#[derive(Parser)]
#[command(version, about = "Interactive synergy engine playground")]
struct Args {
    /// Custom definitions directory (overrides the app config)
    #[arg(short, long)]
    definitions: Option<PathBuf>,

    /// Builtin definitions directory
    #[arg(short, long)]
    builtin: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();
    let args = Args::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("[CONFIG] Using default settings: {}", e);
        AppConfig::default()
    });

    let builtin_dir = args.builtin.or_else(default_builtin_dir);
    let custom_dir = args.definitions.or_else(|| config.custom_definitions_dir());
    let definitions =
        load_definitions(builtin_dir.as_deref(), custom_dir.as_deref()).map_err(|e| e.to_string())?;

    let surface = Arc::new(ConsoleSurface::new());
    let sequencer = AnnouncementSequencer::on_current_runtime(surface, config.announcement.clone());
    let mut engine = Engine::with_sequencer(sequencer);
    let registered = engine.register_definitions(&definitions, &mut commands::logging_effect);
    println!("{registered} synergies registered");

    loop {
        let Some(line) = readline()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut engine) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "synergy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grant one upgrade
    Grant {
        #[arg(short, long)]
        upgrade: String,
    },
    /// Re-apply active synergy effects
    Poll,
    /// Start a new game
    NewGame,
    /// Show synergy progress and held upgrades
    Status,
    /// List registered synergies
    List,
    Exit,
}

fn respond(line: &str, engine: &mut Engine<ConsoleSurface>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "synergy".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Grant { upgrade }) => commands::grant(engine, upgrade)?,
        Some(Commands::Poll) => commands::poll(engine)?,
        Some(Commands::NewGame) => commands::new_game(engine)?,
        Some(Commands::Status) => commands::status(engine),
        Some(Commands::List) => commands::list(engine),
        Some(Commands::Exit) => {
            write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
            std::io::stdout().flush().map_err(|e| e.to_string())?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

/// Prompt and read one line; `None` on end of input
fn readline() -> Result<Option<String>, String> {
    write!(std::io::stdout(), "$ ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok((read > 0).then_some(buffer))
}

/// Initialize logging, writing to SYNERGY_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("SYNERGY_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
