//! Headless runner: the autopilot plays for a number of simulated seconds.
//!
//! Usage: `lane-dodge-headless [seconds]` (default 60).
//!
//! Every game event is printed to stdout as one JSON object per line,
//! tagged with the master tick it happened on. The last line is the final
//! snapshot. Logs go to stderr (`LANE_DODGE_LOG`, default `info`).

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use lane_dodge::core::{GameEvent, GameSnapshot, GameState};
use lane_dodge::engine::Autopilot;
use lane_dodge::types::{ClockConfig, GameMode};

const DEFAULT_SECONDS: u64 = 60;

#[derive(Serialize)]
struct EventLine {
    tick: u64,
    #[serde(flatten)]
    event: GameEvent,
}

#[derive(Serialize)]
struct FinalLine<'a> {
    event: &'static str,
    snapshot: &'a GameSnapshot,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("LANE_DODGE_LOG", "info"))
        .init();

    let seconds = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("invalid number of seconds: {arg:?}"))?,
        None => DEFAULT_SECONDS,
    };
    let config = ClockConfig::from_env()?;
    let total_ticks = seconds * config.master_hz as u64;
    info!("running {seconds} s ({total_ticks} ticks) with {config:?}");

    let mut game = GameState::new(config);
    let mut pilot = Autopilot::new(config.master_hz as u64 / 2, 0);
    let mut snap = GameSnapshot::default();
    let mut best = 0u16;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for _ in 0..total_ticks {
        game.snapshot_into(&mut snap);
        let pulses = pilot.next_pulses(&snap);
        let report = game.step(pulses);
        for &event in &report.events {
            if let GameEvent::ModeChanged {
                to: GameMode::Lost, ..
            } = event
            {
                best = best.max(game.score().value());
            }
            serde_json::to_writer(
                &mut out,
                &EventLine {
                    tick: game.tick(),
                    event,
                },
            )?;
            out.write_all(b"\n")?;
        }
    }

    game.snapshot_into(&mut snap);
    best = best.max(snap.score);
    serde_json::to_writer(
        &mut out,
        &FinalLine {
            event: "final",
            snapshot: &snap,
        },
    )?;
    out.write_all(b"\n")?;
    out.flush()?;

    info!(
        "finished after {} rounds, best score {best}, mode {}",
        snap.round,
        snap.mode.as_str()
    );
    Ok(())
}
