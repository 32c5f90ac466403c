//! Virtual match CLI
//!
//! Simulate matches, inspect schedule assignments and sample playback
//! states from the command line.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vp_core::{
    assignment_at, simulate, simulate_match_json, MatchState, Player, PlayerSide,
};

#[derive(Parser)]
#[command(name = "vp_cli")]
#[command(about = "Deterministic virtual table-tennis matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one match and print the point log
    Simulate {
        /// RNG seed (typically a time-block id)
        #[arg(long)]
        seed: u64,

        /// Side A name
        #[arg(long)]
        player_a: String,

        /// Side A rating
        #[arg(long)]
        rating_a: i32,

        /// Side B name
        #[arg(long)]
        player_b: String,

        /// Side B rating
        #[arg(long)]
        rating_b: i32,

        /// Emit the full JSON response instead of the point log
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show the current block's assignment for a player pool
    Schedule {
        /// JSON file holding the pool: [{"name": ..., "rating": ...}, ...]
        #[arg(long)]
        pool: PathBuf,

        /// Epoch seconds to evaluate at (defaults to now)
        #[arg(long)]
        at: Option<f64>,
    },

    /// Sample the match state at an elapsed time
    State {
        #[arg(long)]
        seed: u64,

        #[arg(long)]
        player_a: String,

        #[arg(long)]
        rating_a: i32,

        #[arg(long)]
        player_b: String,

        #[arg(long)]
        rating_b: i32,

        /// Elapsed seconds from match start
        #[arg(long)]
        at: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, player_a, rating_a, player_b, rating_b, json } => {
            if json {
                let request = serde_json::json!({
                    "schema_version": vp_core::SCHEMA_VERSION,
                    "seed": seed,
                    "player_a": { "name": player_a, "rating": rating_a },
                    "player_b": { "name": player_b, "rating": rating_b },
                });
                let response = simulate_match_json(&request.to_string())?;
                println!("{response}");
                return Ok(());
            }

            let timeline = simulate(
                seed,
                Player::new(player_a, rating_a),
                Player::new(player_b, rating_b),
            )?;
            for (i, p) in timeline.points.iter().enumerate() {
                println!(
                    "point {:>2}  {:>5.0}s-{:>5.0}s  server {:?}  winner {:?}  {}-{}",
                    i + 1,
                    p.start_time,
                    p.end_time,
                    p.server,
                    p.winner,
                    p.score_after_a,
                    p.score_after_b,
                );
            }
            let stats = timeline.stats();
            println!(
                "final: {} {} - {} {} ({} points, {:.0}s)",
                stats.player_a.name,
                stats.player_a.final_score,
                stats.player_b.final_score,
                stats.player_b.name,
                stats.total_points,
                stats.match_duration_seconds,
            );
        }

        Commands::Schedule { pool, at } => {
            let raw = std::fs::read_to_string(&pool)
                .with_context(|| format!("reading pool file {}", pool.display()))?;
            let players: Vec<Player> =
                serde_json::from_str(&raw).context("parsing player pool")?;

            let now = at.unwrap_or_else(|| Utc::now().timestamp_millis() as f64 / 1000.0);
            let assignment = assignment_at(now, &players)?;
            println!("block {}", assignment.block_id);
            println!(
                "{} ({}) vs {} ({})",
                assignment.player_a.name,
                assignment.player_a.rating,
                assignment.player_b.name,
                assignment.player_b.rating,
            );
            println!(
                "elapsed {:.1}s, next match in {:.1}s",
                assignment.elapsed_in_block(now),
                assignment.seconds_until_next_block(now),
            );
        }

        Commands::State { seed, player_a, rating_a, player_b, rating_b, at } => {
            let timeline = simulate(
                seed,
                Player::new(player_a, rating_a),
                Player::new(player_b, rating_b),
            )?;
            let state = timeline.state_at(at);
            match &state {
                MatchState::Playing { point_number, .. } => {
                    println!("playing point {point_number}");
                }
                MatchState::BetweenPoints { point_number, .. } => {
                    println!("break after point {point_number}");
                }
                MatchState::Finished { winner, .. } => {
                    let side = match winner {
                        PlayerSide::A => "A",
                        PlayerSide::B => "B",
                    };
                    println!("finished, winner {side}");
                }
            }
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    Ok(())
}
