//! Terminal input module (engine-facing).
//!
//! Stands in for the board's debounce stage: it maps `crossterm` key events
//! onto the game's buttons and latches presses between master ticks so the
//! core sees at most one clean pulse per button per tick.

pub mod latch;
pub mod map;

pub use lane_dodge_types as types;

pub use latch::PulseLatch;
pub use map::{map_key_event, should_quit, Button};
