//! Engine helpers that drive the game from outside.
//!
//! The [`Autopilot`] reads a [`GameSnapshot`](lane_dodge_core::GameSnapshot)
//! and answers with the button pulses a careful player would press. It is
//! used by the headless runner and the terminal demo mode.

pub mod autopilot;

pub use lane_dodge_core as core;
pub use lane_dodge_types as types;

pub use autopilot::Autopilot;
