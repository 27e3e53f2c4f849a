//! Command line entry point for the scorekeeper
//!
//! Loads configuration, opens the configured repository and runs a single
//! scoreboard operation per invocation.

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use scorekeeper::config::{AppConfig, StorageBackend};
use scorekeeper::service::{MatchSubmission, NewGame, Scoreboard};
use scorekeeper::utils::{format_percentage, format_rating, format_rating_change, format_timestamp};
use scorekeeper::{InMemoryRepository, JsonFileRepository, PlayerResult, Repository, ScorekeeperError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Scorekeeper - multi-player game results and Elo leaderboards
#[derive(Parser)]
#[command(
    name = "scorekeeper",
    version,
    about = "Record multi-player game results and keep per-game Elo leaderboards",
    long_about = "Scorekeeper registers games, records match results with finishing positions \
                 (ties allowed), and maintains a per-game leaderboard using a round-robin \
                 multi-player Elo rating."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Override the data directory")]
    data_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Use a throwaway in-memory store
    #[arg(long, help = "Keep data in memory only (nothing is written to disk)")]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage games
    Game {
        #[command(subcommand)]
        action: GameCommand,
    },
    /// Inspect players
    Player {
        #[command(subcommand)]
        action: PlayerCommand,
    },
    /// Submit and review matches
    Match {
        #[command(subcommand)]
        action: MatchCommand,
    },
    /// Show a game's leaderboard
    Leaderboard {
        /// Game name or id
        #[arg(short, long)]
        game: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum GameCommand {
    /// Register a new game
    Add(AddGameArgs),
    /// List registered games
    List,
    /// Remove a game with its ratings and matches
    Remove {
        /// Game name or id
        game: String,
    },
}

#[derive(ClapArgs)]
struct AddGameArgs {
    /// Game name
    name: String,
    /// Rating change scale for this game
    #[arg(short, long)]
    k_factor: Option<f64>,
    /// Starting rating for new players
    #[arg(short = 'r', long)]
    default_rating: Option<f64>,
    /// Free-form description
    #[arg(long)]
    description: Option<String>,
}

#[derive(Subcommand)]
enum PlayerCommand {
    /// List all players
    List,
    /// Show a player's ratings across games
    Show {
        /// Player name
        name: String,
    },
}

#[derive(Subcommand)]
enum MatchCommand {
    /// Record a match result
    Submit {
        /// Game name or id
        #[arg(short, long)]
        game: String,
        /// Finishing position as NAME=POSITION, repeated per player
        #[arg(short, long = "result", value_name = "NAME=POSITION", value_parser = parse_player_result, required = true)]
        results: Vec<PlayerResult>,
        /// Optional notes stored with the match
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show recent matches of a game
    History {
        /// Game name or id
        #[arg(short, long)]
        game: String,
        /// Maximum number of matches to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Parse `NAME=POSITION`; the last `=` separates the two so names may contain one
fn parse_player_result(value: &str) -> std::result::Result<PlayerResult, String> {
    let (name, position) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=POSITION, got '{}'", value))?;
    let position = position
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid position '{}' for '{}'", position, name))?;
    Ok(PlayerResult::new(name, position))
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    if args.in_memory {
        config.storage.backend = StorageBackend::Memory;
    }

    scorekeeper::config::validate_config(&config)?;
    Ok(config)
}

fn open_repository(config: &AppConfig) -> Result<Arc<dyn Repository>> {
    match config.storage.backend {
        StorageBackend::Json => {
            let repository = JsonFileRepository::open(&config.storage.data_dir)?;
            info!("Using data directory {}", repository.data_dir().display());
            Ok(Arc::new(repository))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; nothing will be persisted");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

fn run_game(board: &Scoreboard, action: GameCommand) -> Result<()> {
    match action {
        GameCommand::Add(args) => {
            let game = board.register_game(NewGame {
                name: args.name,
                description: args.description,
                k_factor: args.k_factor,
                default_rating: args.default_rating,
            })?;
            println!(
                "Registered {} (K-factor {}, starting rating {})",
                game.name,
                game.k_factor,
                format_rating(game.default_rating)
            );
        }
        GameCommand::List => {
            let games = board.list_games()?;
            if games.is_empty() {
                println!("No games registered");
            }
            for game in games {
                println!(
                    "{:<24} K={:<6} start={:<6} {}",
                    game.name,
                    game.k_factor,
                    format_rating(game.default_rating),
                    game.description.unwrap_or_default()
                );
            }
        }
        GameCommand::Remove { game } => {
            let removed = board.delete_game(&game)?;
            println!("Removed {}", removed.name);
        }
    }
    Ok(())
}

fn run_player(board: &Scoreboard, action: PlayerCommand) -> Result<()> {
    match action {
        PlayerCommand::List => {
            let players = board.list_players()?;
            if players.is_empty() {
                println!("No players yet");
            }
            for player in players {
                println!(
                    "{:<24} since {}",
                    player.name,
                    format_timestamp(&player.created_at)
                );
            }
        }
        PlayerCommand::Show { name } => {
            let stats = board.player_stats(&name)?;
            println!("{}", stats.player.name);
            for standing in stats.standings {
                let r = &standing.rating;
                println!(
                    "  {:<24} {:>6}  {} played  {}W {}L {}D  last {}",
                    standing.game_name,
                    format_rating(r.rating),
                    r.games_played,
                    r.wins,
                    r.losses,
                    r.draws,
                    format_timestamp(&r.last_played)
                );
            }
        }
    }
    Ok(())
}

fn run_match(board: &Scoreboard, action: MatchCommand) -> Result<()> {
    match action {
        MatchCommand::Submit {
            game,
            results,
            notes,
        } => {
            let record = board.submit_match(MatchSubmission {
                game,
                results,
                notes,
            })?;
            let mut participants = record.participants;
            participants.sort_by_key(|p| p.position);
            for p in participants {
                println!(
                    "{:>3}. {:<24} {:>6} -> {:<6} ({})",
                    p.position,
                    p.player_name,
                    format_rating(p.rating_before),
                    p.rating_after,
                    format_rating_change(p.rating_change)
                );
            }
        }
        MatchCommand::History { game, limit } => {
            let history = board.match_history(&game, limit)?;
            if history.is_empty() {
                println!("No matches recorded");
            }
            for record in history {
                let mut participants = record.participants.clone();
                participants.sort_by_key(|p| p.position);
                let line: Vec<String> = participants
                    .iter()
                    .map(|p| {
                        format!(
                            "{}. {} ({})",
                            p.position,
                            p.player_name,
                            format_rating_change(p.rating_change)
                        )
                    })
                    .collect();
                println!("{}  {}", format_timestamp(&record.played_at), line.join(", "));
                if let Some(notes) = &record.notes {
                    println!("    {}", notes);
                }
            }
        }
    }
    Ok(())
}

fn run_leaderboard(board: &Scoreboard, game: &str, json: bool) -> Result<()> {
    let entries = board.leaderboard(game)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No rated players yet");
    }
    for entry in entries {
        println!(
            "{:>3}. {:<24} {:>6}  {:>3} played  {}W {}L {}D  {}",
            entry.rank,
            entry.player_name,
            format_rating(entry.rating),
            entry.games_played,
            entry.wins,
            entry.losses,
            entry.draws,
            format_percentage(entry.win_rate)
        );
    }
    Ok(())
}

fn run(args: Args, config: AppConfig) -> Result<()> {
    let repository = open_repository(&config)?;
    let board = Scoreboard::new(repository, config.rating.clone());
    debug!("Scoreboard ready ({})", config.service.name);

    match args.command {
        Command::Game { action } => run_game(&board, action),
        Command::Player { action } => run_player(&board, action),
        Command::Match { action } => run_match(&board, action),
        Command::Leaderboard { game, json } => run_leaderboard(&board, &game, json),
    }
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(args, config) {
        match e.downcast_ref::<ScorekeeperError>() {
            Some(ScorekeeperError::InvalidMatchResult { errors }) => {
                eprintln!("Match result rejected:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
            }
            _ => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_result() {
        let result = parse_player_result("Alice=1").unwrap();
        assert_eq!(result, PlayerResult::new("Alice", 1));

        let result = parse_player_result("A=B=2").unwrap();
        assert_eq!(result, PlayerResult::new("A=B", 2));

        assert!(parse_player_result("Alice").is_err());
        assert!(parse_player_result("Alice=first").is_err());
    }

    #[test]
    fn test_cli_parses_match_submission() {
        let args = Args::try_parse_from([
            "scorekeeper",
            "--in-memory",
            "match",
            "submit",
            "--game",
            "Catan",
            "-r",
            "Alice=1",
            "-r",
            "Bob=2",
        ])
        .unwrap();

        assert!(args.in_memory);
        match args.command {
            Command::Match {
                action: MatchCommand::Submit { game, results, .. },
            } => {
                assert_eq!(game, "Catan");
                assert_eq!(results.len(), 2);
            }
            _ => panic!("expected match submit"),
        }
    }

    #[test]
    fn test_clap_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
