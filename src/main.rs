//! Tag Chase headless runner
//!
//! Plays rounds with the player on autopilot and logs how they went. Useful
//! for balance checks without a renderer attached.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tag_chase::sim::{SimEvent, Simulation};
use tag_chase::{Tuning, presentation_hints};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Seed for terrain and spawns (overrides the tuning file)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON tuning file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Number of rounds to play back to back
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Stop after this many ticks even if a round is still running
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Difficulty scalar applied to monster speed
    #[arg(long)]
    excitement: Option<f64>,
    /// Write the final snapshot here as JSON
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct RoundSummary {
    score: u64,
    tags: u32,
    power_ups: u32,
    ticks: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if let Some(seed) = cli.seed {
        tuning.seed = seed;
    }
    if let Some(excitement) = cli.excitement {
        tuning.excitement = excitement;
    }
    tuning.autopilot = true;
    tuning.validate()?;

    log::info!("Tag Chase (headless) starting, seed {}", tuning.seed);
    let mut sim = Simulation::new(tuning);
    let bridge = sim.input_bridge();
    let max_ticks = cli.max_ticks.unwrap_or(u64::MAX);

    let mut summaries = Vec::new();
    'rounds: for round in 1..=cli.rounds {
        bridge.start_round();
        let mut summary = RoundSummary::default();
        loop {
            if sim.ticks() >= max_ticks {
                log::warn!("Tick limit reached during round {}", round);
                summary.score = sim.round.score;
                summaries.push(summary);
                break 'rounds;
            }
            let snapshot = sim.step();
            summary.ticks += 1;
            for event in &snapshot.events {
                match event {
                    SimEvent::Tagged { .. } => summary.tags += 1,
                    SimEvent::PowerUpCollected { .. } => summary.power_ups += 1,
                    _ => {}
                }
            }
            if let Some(banner) = presentation_hints(&snapshot).banner {
                log::debug!("[{}] {}", snapshot.tick, banner);
            }
            if let Some(SimEvent::RoundOver { score }) = snapshot
                .events
                .iter()
                .find(|e| matches!(e, SimEvent::RoundOver { .. }))
            {
                summary.score = *score;
                break;
            }
        }
        summaries.push(summary);
    }

    for (i, s) in summaries.iter().enumerate() {
        log::info!(
            "Round {}: score {}, {} tags, {} power-ups, {} ticks",
            i + 1,
            s.score,
            s.tags,
            s.power_ups,
            s.ticks
        );
        println!("round {} score {}", i + 1, s.score);
    }

    if let Some(path) = &cli.snapshot_out {
        let json = serde_json::to_string_pretty(&*sim.snapshot())?;
        std::fs::write(path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
