use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whiterabbit::clues::ClueEngine;
use whiterabbit::config::Config;
use whiterabbit::error::{Error, WhiteRabbitErrorTrait};

#[derive(Parser)]
#[command(
    name = "whiterabbit",
    version,
    about = "Clue distribution for Alice is Missing game sessions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file (defaults to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Randomize and assign clue times to players
    Assign {
        /// Comma-separated roster, e.g. alice,bob,charlie
        #[arg(short, long, value_delimiter = ',', required = true)]
        players: Vec<String>,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Print the assignment as JSON
        #[arg(long)]
        json: bool,
    },

    /// (Re)shuffle the clue card piles
    Shuffle {
        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Deal, shuffle, then draw one player's clue card
    Clue {
        /// Comma-separated roster
        #[arg(short, long, value_delimiter = ',', required = true)]
        players: Vec<String>,

        /// Player drawing the clue
        #[arg(long)]
        player: String,

        /// Clue time in minutes
        #[arg(short, long)]
        time: u32,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Measure how many draws the partition search needs
    Simulate {
        /// Player count to simulate
        #[arg(short, long, default_value = "3")]
        players: usize,

        /// Number of generations to run
        #[arg(short, long, default_value = "100")]
        trials: u64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate the configuration and print the bucket table
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    config.validate().context("Invalid configuration")?;

    if cli.metrics {
        if let Err(e) = whiterabbit::metrics::init_metrics() {
            tracing::warn!(error = %e, "Metrics initialization failed; continuing without metrics");
        }
    }

    match cli.command {
        Commands::Assign { players, seed, json } => {
            tracing::info!(players = ?players, seed = ?seed, "Starting assign command");
            let mut engine = build_engine(&config, seed);
            let assignment = engine
                .assign(players.len(), players.as_slice())
                .map_err(Error::from)
                .map_err(report)?;

            if json {
                let text = serde_json::to_string_pretty(assignment)
                    .map_err(Error::from)
                    .map_err(report)?;
                println!("{text}");
            } else {
                print_assignment(&engine)?;
            }
        }

        Commands::Shuffle { seed } => {
            tracing::info!(seed = ?seed, "Starting shuffle command");
            let mut engine = build_engine(&config, seed);
            let selection = engine.reshuffle_reveals();
            for (time, variant) in selection.iter() {
                println!("{time:>3} min -> card {variant}");
            }
        }

        Commands::Clue {
            players,
            player,
            time,
            seed,
        } => {
            tracing::info!(
                players = ?players,
                player = %player,
                time = %time,
                seed = ?seed,
                "Starting clue command"
            );
            let mut engine = build_engine(&config, seed);
            engine
                .assign(players.len(), players.as_slice())
                .map_err(Error::from)
                .map_err(report)?;
            engine.reshuffle_reveals();
            print_assignment(&engine)?;

            let card = engine
                .lookup_card(&player, time)
                .map_err(Error::from)
                .map_err(report)?;
            println!("{player} draws the {card}");
            println!("{}", card.path_in(&config.clues.clue_dir).display());
        }

        Commands::Simulate {
            players,
            trials,
            seed,
        } => {
            tracing::info!(players = %players, trials = %trials, "Starting simulate command");
            let mut engine = build_engine(&config, seed);
            let summary = engine
                .simulate(players, trials)
                .map_err(Error::from)
                .map_err(report)?;
            print!("{}", summary.display());
        }

        Commands::CheckConfig => {
            let clues = &config.clues;
            println!("Configuration OK");
            println!("Clue times: {:?}", clues.clue_times);
            println!(
                "Terminal clue: {} -> {} (card {})",
                clues.terminal_time, clues.special_player, clues.terminal_variant
            );
            println!("Minimum separation: {} min", clues.min_separation);
            for players in clues.supported_player_counts() {
                if let Some(sizes) = clues.sizes_for(players) {
                    println!("  {players} players: {sizes:?}");
                }
            }
        }
    }

    if cli.metrics {
        match whiterabbit::metrics::encode_metrics() {
            Ok(text) => print!("{text}"),
            Err(e) => tracing::warn!(error = %e, "Failed to encode metrics"),
        }
    }

    tracing::info!("whiterabbit completed successfully");
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => Config::from_env()?,
    };
    Ok(config)
}

fn build_engine(config: &Config, seed: Option<u64>) -> ClueEngine {
    match seed {
        Some(seed) => ClueEngine::with_seed(config.clues.clone(), seed),
        None => ClueEngine::new(config.clues.clone()),
    }
}

/// Show the player-facing message, then hand the error back for the exit code
fn report(err: Error) -> anyhow::Error {
    eprintln!("{}", err.user_message());
    if !err.is_recoverable() {
        tracing::error!(error = %err, category = ?err.category(), "Unrecoverable error");
    }
    err.into()
}

fn print_assignment(engine: &ClueEngine) -> Result<()> {
    let text = engine.describe_assignment()?;
    println!("```\n{text}\n```");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("whiterabbit=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("whiterabbit={level},warn"))
            .context("Invalid log level")?
    };

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
    }

    Ok(())
}
