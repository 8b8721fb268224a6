//! Terminal "display renderer" module.
//!
//! The core hands over four abstract seven-segment glyphs per tick. This
//! crate paints them as large LED-style digits into a framebuffer and
//! flushes that framebuffer to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Keep the view pure so it can be unit-tested without a terminal
//! - Only repaint when the glyphs change or a refresh frame is due

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod throttle;

pub use lane_dodge_core as core;
pub use lane_dodge_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::RefreshThrottle;
