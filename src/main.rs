//! Terminal lane-dodge runner (default binary).
//!
//! Wall-clock time is converted into master ticks at `master_hz`; every
//! loop iteration steps the simulation through the ticks that became due
//! and draws the four-digit board through the refresh throttle.
//!
//! `--demo` lets the autopilot play.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use lane_dodge::core::{GameSnapshot, GameState};
use lane_dodge::engine::Autopilot;
use lane_dodge::input::{map_key_event, should_quit, PulseLatch};
use lane_dodge::term::{FrameBuffer, GameView, RefreshThrottle, TerminalRenderer, Viewport};
use lane_dodge::types::{ButtonPulses, ClockConfig};

/// Input poll timeout; bounds the latency of a key press.
const POLL: Duration = Duration::from_millis(4);
/// Target frame rate for the refresh throttle.
const FRAME_HZ: u32 = 60;

fn main() -> Result<()> {
    init_logging()?;

    let config = ClockConfig::from_env().unwrap_or_else(|err| {
        warn!("ignoring clock configuration: {err}");
        ClockConfig::default()
    });
    let demo = std::env::args().skip(1).any(|arg| arg == "--demo");
    info!("starting with {config:?} (demo: {demo})");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, demo);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `LANE_DODGE_LOG_PATH` when set; the alternate screen owns
/// stdout/stderr otherwise, so logging stays off.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("LANE_DODGE_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("LANE_DODGE_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: ClockConfig, demo: bool) -> Result<()> {
    let mut game = GameState::new(config);
    let mut latch = PulseLatch::new();
    let mut autopilot = demo.then(|| Autopilot::new(config.master_hz as u64, 0));

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RefreshThrottle::new(
        (config.refresh_hz / FRAME_HZ).max(1),
        config.master_hz as u64,
    );

    let master_hz = config.master_hz as u128;
    // Never replay more than a quarter second after a stall (suspend, debugger).
    let max_batch = (config.master_hz as u64 / 4).max(1);
    let start = Instant::now();
    let mut stepped: u64 = 0;

    loop {
        if event::poll(POLL)? {
            loop {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(button) = map_key_event(key) {
                            latch.press(button);
                        }
                    }
                    Event::Resize(..) => {
                        term.invalidate();
                        throttle.invalidate();
                    }
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let due = (start.elapsed().as_nanos() * master_hz / 1_000_000_000) as u64;
        if due.saturating_sub(stepped) > max_batch {
            stepped = due - max_batch;
        }

        let mut pulses = latch.take();
        while stepped < due {
            if let Some(pilot) = autopilot.as_mut() {
                game.snapshot_into(&mut snap);
                pulses = pulses.merge(pilot.next_pulses(&snap));
            }
            let report = game.step(pulses);
            throttle.observe(&report.ticks);
            pulses = ButtonPulses::NONE;
            stepped += 1;
        }
        if !pulses.is_empty() {
            // No tick was due yet; keep the presses for the next one.
            latch.restore(pulses);
        }

        game.snapshot_into(&mut snap);
        if throttle.should_draw(game.tick(), snap.display_fingerprint()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}
