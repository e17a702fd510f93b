//! Binary entrypoint for the Gorstan CLI.
//!
//! Commands:
//! - `play` - start the interactive adventure (the default)
//! - `init` - create a starter `config.toml`
//! - `status` - print the saved game summary, if any
//!
//! See the library crate docs for module-level details: `gorstan::`.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use gorstan::config::Config;
use gorstan::engine::save::{SaveStore, SledSaveStore};
use gorstan::engine::{canonical_world, GameEngine};
use gorstan::logutil::escape_log;

#[derive(Parser)]
#[command(name = "gorstan")]
#[command(about = "A text adventure across the Gorstan multiverse")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the adventure
    Play {
        /// Resume from the saved game, if one exists
        #[arg(short, long)]
        load: bool,
    },
    /// Write a starter configuration file
    Init,
    /// Show the saved game summary
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play { load: false });

    let config = match &command {
        Commands::Init => None,
        _ => Config::load(&cli.config).ok(),
    };
    if !matches!(command, Commands::Init) {
        init_logging(&config, cli.verbose);
    }

    match command {
        Commands::Play { load } => {
            let config = config.unwrap_or_else(|| {
                warn!("no config at {}; using defaults", cli.config);
                Config::default()
            });
            play(config, load)
        }
        Commands::Init => {
            Config::create_default(&cli.config)?;
            println!("Wrote starter configuration to {}", cli.config);
            Ok(())
        }
        Commands::Status => {
            let config = config.unwrap_or_default();
            status(&config)
        }
    }
}

fn play(config: Config, load: bool) -> Result<()> {
    info!("Starting Gorstan v{}", env!("CARGO_PKG_VERSION"));
    let data_dir = config.storage.data_dir.clone();
    let title = config.game.name.clone();
    let mut engine = GameEngine::new(config, canonical_world());

    // Persistence is best-effort: a broken save store degrades to an
    // in-session game rather than a refusal to play.
    let store = match SledSaveStore::open(Path::new(&data_dir)) {
        Ok(store) => Some(store),
        Err(err) => {
            warn!("save store unavailable: {}", err);
            None
        }
    };

    if load {
        match store.as_ref() {
            Some(store) => match engine.load_from(store) {
                Ok(true) => println!("Saved game restored."),
                Ok(false) => println!("No saved game found; starting fresh."),
                Err(err) => {
                    warn!("failed to load saved game: {}", err);
                    println!("The saved game could not be restored; starting fresh.");
                }
            },
            None => println!("No save store available; starting fresh."),
        }
    }

    println!("=== {} ===", title);
    println!("Type 'help' for commands, 'save' to save, 'quit' to leave.");
    println!();
    for line in engine.room_view().lines {
        println!("{}", line);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "save" => {
                match store.as_ref() {
                    Some(store) => match engine.save_to(store) {
                        Ok(()) => println!("Game saved."),
                        Err(err) => {
                            warn!("save failed: {}", err);
                            println!("The save didn't take. Carry on regardless.");
                        }
                    },
                    None => println!("No save store available."),
                }
                continue;
            }
            "load" => {
                match store.as_ref() {
                    Some(store) => match engine.load_from(store) {
                        Ok(true) => {
                            println!("Saved game restored.");
                            for line in engine.room_view().lines {
                                println!("{}", line);
                            }
                        }
                        Ok(false) => println!("No saved game found."),
                        Err(err) => {
                            warn!("load failed: {}", err);
                            println!("The saved game could not be restored.");
                        }
                    },
                    None => println!("No save store available."),
                }
                continue;
            }
            _ => {}
        }
        info!("command: {}", escape_log(input));
        let room_before = engine.state().current_room.clone();
        let outcome = engine.submit_command(input);
        for line in outcome.lines {
            println!("{}", line);
        }
        if engine.state().current_room != room_before {
            for line in engine.room_view().lines {
                println!("{}", line);
            }
        }
    }
    println!("Goodbye.");
    Ok(())
}

fn status(config: &Config) -> Result<()> {
    let store = SledSaveStore::open(Path::new(&config.storage.data_dir))?;
    match store.load_snapshot()? {
        Some(snapshot) => {
            println!("Saved game from {}", snapshot.saved_at);
            println!("  player: {}", snapshot.state.player_name);
            println!("  room:   {}", snapshot.state.current_room);
            println!("  score:  {}", snapshot.state.score);
            println!("  cycle:  {}", snapshot.state.reset_count);
            println!("  rooms visited: {}", snapshot.state.visited_rooms.len());
        }
        None => println!("No saved game."),
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|cfg| cfg.logging.level.as_str())
            .unwrap_or("info")
            .parse()
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(file) = config.as_ref().and_then(|cfg| cfg.logging.file.clone()) {
        match std::fs::OpenOptions::new().create(true).append(true).open(&file) {
            Ok(f) => {
                builder.target(env_logger::Target::Pipe(Box::new(f)));
            }
            Err(err) => {
                eprintln!("could not open log file {}: {}", file, err);
            }
        }
    }
    let _ = builder.try_init();
}
