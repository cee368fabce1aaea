//! Gridiron CLI
//!
//! Simulate games, run seeded batches, validate table files and export
//! table schemas.

mod loaders;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridiron_core::api::{summarize, BatchReport};
use gridiron_core::data::{
    KickingTable, KickingTableDoc, MatchupTable, MatchupTableDoc, PenaltyTable, PenaltyTableDoc, PlayCatalog,
    PlayCatalogDoc,
};
use gridiron_core::{
    schema_json, simulate_batch, simulate_game, CoachProfile, GameEvent, GameRequest, GameResponse, TableStore,
};
use tracing_subscriber::EnvFilter;

use loaders::{load_coach, load_config, load_table};

#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "Dice-table American football simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game and print the result
    Simulate {
        /// Random seed
        #[arg(long, default_value_t = 42, env = "GRIDIRON_SEED")]
        seed: u64,

        /// Home coach: built-in name or profile path
        #[arg(long, default_value = "conservative")]
        home_coach: String,

        /// Away coach: built-in name or profile path
        #[arg(long, default_value = "aggressive")]
        away_coach: String,

        /// Engine config file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the event stream as JSON to this path ("-" for stdout)
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Simulate many seeded games in parallel and print aggregate results
    Batch {
        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u64,

        /// First seed; game i uses seed + i
        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[arg(long, default_value = "conservative")]
        home_coach: String,

        #[arg(long, default_value = "aggressive")]
        away_coach: String,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load table files and report schema violations
    Validate {
        #[arg(long)]
        matchup: Option<PathBuf>,

        #[arg(long)]
        penalty: Option<PathBuf>,

        #[arg(long)]
        kicking: Option<PathBuf>,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the JSON Schema of a table or document type
    Schema {
        #[arg(long, value_enum)]
        table: SchemaTarget,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SchemaTarget {
    Matchup,
    Penalty,
    Kicking,
    Plays,
    Coach,
    Events,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, home_coach, away_coach, config, events } => {
            let response = run_simulate(seed, &home_coach, &away_coach, config.as_deref())?;
            print_game(&response);
            if let Some(path) = events {
                write_events(&path, &response.events)?;
            }
        }
        Commands::Batch { games, seed, home_coach, away_coach, config } => {
            let report = run_batch(games, seed, &home_coach, &away_coach, config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Validate { matchup, penalty, kicking, catalog } => {
            let results = validate_tables(
                matchup.as_deref(),
                penalty.as_deref(),
                kicking.as_deref(),
                catalog.as_deref(),
            );
            if results.is_empty() {
                bail!("nothing to validate; pass at least one of --matchup, --penalty, --kicking, --catalog");
            }
            let mut failures = 0;
            for (path, result) in &results {
                match result {
                    Ok(()) => println!("ok      {}", path.display()),
                    Err(err) => {
                        failures += 1;
                        println!("invalid {}: {err:#}", path.display());
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} of {} table files failed validation", results.len());
            }
        }
        Commands::Schema { table } => {
            println!("{}", serde_json::to_string_pretty(&schema_for(table)?)?);
        }
    }

    Ok(())
}

fn run_simulate(seed: u64, home: &str, away: &str, config: Option<&Path>) -> Result<GameResponse> {
    let mut request = GameRequest::new(seed);
    request.home_coach = Some(load_coach(home)?);
    request.away_coach = Some(load_coach(away)?);
    request.config = Some(load_config(config)?);
    let tables = TableStore::embedded().context("embedded tables")?;
    Ok(simulate_game(&request, tables)?)
}

fn run_batch(games: u64, seed: u64, home: &str, away: &str, config: Option<&Path>) -> Result<BatchReport> {
    let home: CoachProfile = load_coach(home)?;
    let away: CoachProfile = load_coach(away)?;
    let config = load_config(config)?;
    let seeds: Vec<u64> = (0..games).map(|i| seed.wrapping_add(i)).collect();
    let summaries = simulate_batch(&seeds, TableStore::embedded()?, &home, &away, &config)?;
    Ok(summarize(&summaries))
}

fn print_game(response: &GameResponse) {
    println!("Seed:     {}", response.seed);
    println!("Final:    Home {} - {} Away", response.home_score, response.away_score);
    let result = match response.winner {
        Some(side) => format!("{} wins", side.name()),
        None => "tie".to_string(),
    };
    println!("Result:   {}{}", result, if response.overtime { " (OT)" } else { "" });
    println!("Plays:    {}", response.plays);
    println!("Events:   {}", response.events.len());
    println!("Checksum: {}", response.fingerprint);
}

fn write_events(path: &Path, events: &[GameEvent]) -> Result<()> {
    let json = serde_json::to_string_pretty(events)?;
    if path == Path::new("-") {
        println!("{json}");
    } else {
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), events = events.len(), "events written");
    }
    Ok(())
}

/// Loads every given table file. Each result is reported independently so
/// one bad file does not hide problems in the others.
fn validate_tables(
    matchup: Option<&Path>,
    penalty: Option<&Path>,
    kicking: Option<&Path>,
    catalog: Option<&Path>,
) -> Vec<(PathBuf, Result<()>)> {
    let mut results = Vec::new();
    if let Some(path) = matchup {
        let result = load_table::<MatchupTable>(path).and_then(|table| {
            let missing = table.missing_pairings();
            if missing.is_empty() {
                Ok(())
            } else {
                bail!("{} offense/defense pairings have no entry", missing.len())
            }
        });
        results.push((path.to_path_buf(), result));
    }
    if let Some(path) = penalty {
        results.push((path.to_path_buf(), load_table::<PenaltyTable>(path).map(|_| ())));
    }
    if let Some(path) = kicking {
        results.push((path.to_path_buf(), load_table::<KickingTable>(path).map(|_| ())));
    }
    if let Some(path) = catalog {
        results.push((path.to_path_buf(), load_table::<PlayCatalog>(path).map(|_| ())));
    }
    results
}

fn schema_for(target: SchemaTarget) -> gridiron_core::Result<serde_json::Value> {
    match target {
        SchemaTarget::Matchup => schema_json::<MatchupTableDoc>(),
        SchemaTarget::Penalty => schema_json::<PenaltyTableDoc>(),
        SchemaTarget::Kicking => schema_json::<KickingTableDoc>(),
        SchemaTarget::Plays => schema_json::<PlayCatalogDoc>(),
        SchemaTarget::Coach => schema_json::<CoachProfile>(),
        SchemaTarget::Events => schema_json::<Vec<GameEvent>>(),
    }
}
