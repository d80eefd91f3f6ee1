use anyhow::Context;
use clap::{Arg, Command};
use log::{error, info, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{
    io::BufRead,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use oneblock_data::{DropDefaultsDatabase, ExchangeDatabase, UnlockDatabase};
use oneblock_server::{
    console::{parse_console_line, HeadlessWorld},
    game::{
        resources::{GameConfig, GameData},
        GameWorld,
    },
};

const UNLOCK_BENCH_FILE: &str = "unlock_bench.json";
const UNLOCK_RECIPE_DIR: &str = "unlocks";
const EXCHANGE_BENCH_FILE: &str = "exchange_bench.json";
const EXCHANGE_RECIPE_DIR: &str = "exchanges";

fn load_unlock_database(game_data_path: Option<&Path>) -> Result<UnlockDatabase, anyhow::Error> {
    let game_data_path = match game_data_path {
        Some(game_data_path) => game_data_path,
        None => return Ok(UnlockDatabase::default()),
    };

    let bench_path = game_data_path.join(UNLOCK_BENCH_FILE);
    if !bench_path.exists() {
        warn!("No unlock bench at {}", bench_path.to_string_lossy());
        return Ok(UnlockDatabase::default());
    }

    oneblock_data_json::get_unlock_database(&bench_path, &game_data_path.join(UNLOCK_RECIPE_DIR))
        .with_context(|| format!("Failed to load unlocks from {}", bench_path.to_string_lossy()))
}

fn load_exchange_database(
    game_data_path: Option<&Path>,
) -> Result<ExchangeDatabase, anyhow::Error> {
    let game_data_path = match game_data_path {
        Some(game_data_path) => game_data_path,
        None => return Ok(ExchangeDatabase::default()),
    };

    let bench_path = game_data_path.join(EXCHANGE_BENCH_FILE);
    if !bench_path.exists() {
        warn!("No exchange bench at {}", bench_path.to_string_lossy());
        return Ok(ExchangeDatabase::default());
    }

    oneblock_data_json::get_exchange_database(
        &bench_path,
        &game_data_path.join(EXCHANGE_RECIPE_DIR),
    )
    .with_context(|| {
        format!(
            "Failed to load exchanges from {}",
            bench_path.to_string_lossy()
        )
    })
}

fn main() -> Result<(), anyhow::Error> {
    let command = Command::new("oneblock-server")
        .about("OneBlock drop progression server")
        .arg(
            Arg::new("storage")
                .long("storage")
                .help("Drops state file")
                .takes_value(true),
        )
        .arg(
            Arg::new("game-data")
                .long("game-data")
                .help("Directory containing the unlock and exchange benches")
                .takes_value(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level (error, warn, info, debug, trace)")
                .takes_value(true)
                .default_value("info"),
        );
    let matches = command.get_matches();

    let log_level = matches
        .value_of("log-level")
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(LevelFilter::Info);
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialise logger")?;

    let mut config = GameConfig::default();
    if let Some(storage_path) = matches.value_of("storage") {
        config.storage_path = PathBuf::from(storage_path);
    }
    config.game_data_path = matches.value_of("game-data").map(PathBuf::from);

    let drop_defaults = Arc::new(DropDefaultsDatabase::builtin());
    let unlocks = Arc::new(load_unlock_database(config.game_data_path.as_deref())?);
    let exchanges = Arc::new(load_exchange_database(config.game_data_path.as_deref())?);
    info!(
        "Loaded {} unlocks and {} exchanges, storing drops in {}",
        unlocks.len(),
        exchanges.len(),
        config.storage_path.to_string_lossy()
    );
    let game_data = GameData::new(&config, drop_defaults, unlocks, exchanges);

    let (game_event_tx, game_event_rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    error!("Failed to read console input: {}", error);
                    break;
                }
            };

            match parse_console_line(&line) {
                Ok(Some(event)) => {
                    if game_event_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => warn!("{}", error),
            }
        }
    });

    let mut world = HeadlessWorld::new(true).without_recording();
    GameWorld::new(game_event_rx).run(&game_data, &mut world);
    Ok(())
}
