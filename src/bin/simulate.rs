//! Arcade batch simulator CLI.
//!
//! Plays seeded batches of every game with scripted policies and prints a
//! per-game report.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 100 runs of every game
//!   cargo run --bin simulate -- -n 500 --game tetris
//!   cargo run --bin simulate -- --seed 42          # Reproducible run
//!
//! Game settings (difficulties, Gomoku weights, Tetris table, memory pairs,
//! starting bankroll) are read from ~/.arcade/config.json when present.
//!
//! Set RUST_LOG=arcade=debug to see terminal transitions as they happen.

use arcade::core::config::ArcadeConfig;
use arcade::games::GameId;
use arcade::simulator::{run_simulation, SimConfig};
use std::env;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (mut config, write_json) = parse_args(&args);
    config.arcade = ArcadeConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "using default game settings");
        ArcadeConfig::default()
    });

    if config.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║                  ARCADE BATCH SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs per game:  {}", config.num_runs);
        println!(
            "  Games:          {}",
            config
                .games
                .iter()
                .map(|g| g.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("  Max Steps:      {}", config.max_steps_per_run);
        println!(
            "  Difficulty:     snake {:?}, flappy {:?}, minesweeper {:?}",
            config.arcade.snake_difficulty,
            config.arcade.flappy_difficulty,
            config.arcade.minesweeper_difficulty
        );
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut write_json = false;
    let mut selected: Vec<GameId> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-g" | "--game" => {
                if i + 1 < args.len() {
                    match GameId::from_name(&args[i + 1]) {
                        Some(game) if !selected.contains(&game) => selected.push(game),
                        Some(_) => {}
                        None => {
                            eprintln!("Unknown game: {}", args[i + 1]);
                            std::process::exit(2);
                        }
                    }
                    i += 1;
                }
            }
            "-t" | "--steps" => {
                if i + 1 < args.len() {
                    config.max_steps_per_run = args[i + 1].parse().unwrap_or(50_000);
                    i += 1;
                }
            }
            "--json" => {
                write_json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    if !selected.is_empty() {
        config.games = selected;
    }
    (config, write_json)
}

fn print_help() {
    println!("Arcade Batch Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Runs per game (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -g, --game <NAME>   Only simulate NAME (repeatable)");
    println!("    -t, --steps <T>     Max policy steps per run (default: 50,000)");
    println!("    -v, --verbose       Print every run");
    println!("    -q, --quiet         Only print the report");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("GAMES:");
    println!(
        "    {}",
        GameId::ALL
            .iter()
            .map(|g| g.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
