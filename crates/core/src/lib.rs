//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole lane-dodging simulation. It has no
//! dependencies on terminals, files or threads, which makes it:
//!
//! - **Deterministic**: one master tick in, one consistent state out
//! - **Testable**: every register can be observed through a snapshot
//! - **Portable**: runs in the terminal front end, headless, or in benches
//! - **Allocation-free**: the step function works on fixed-size arrays only
//!
//! # Module Structure
//!
//! - [`clock`]: divider + edge-detector pulse streams (1 Hz, blink, move, refresh)
//! - [`rng`]: 8-bit LFSR lane generator
//! - [`player`]: player lane register
//! - [`obstacles`]: spawn gate and 4-row conveyor
//! - [`scoring`]: registered collision check and saturating BCD score
//! - [`mode`]: ScoreIdle → Countdown → Play → Lost state machine
//! - [`display`]: per-mode glyph composition
//! - [`game_state`]: the aggregate and its step function
//! - [`snapshot`]: serializable copy of every register
//!
//! # Example
//!
//! ```
//! use lane_dodge_core::GameState;
//! use lane_dodge_types::{ButtonPulses, ClockConfig, GameMode};
//!
//! let mut game = GameState::new(ClockConfig::default());
//! game.step(ButtonPulses::center());
//! assert_eq!(game.mode(), GameMode::Countdown);
//!
//! // Three 1 Hz pulses later the round starts.
//! while game.mode() == GameMode::Countdown {
//!     game.step(ButtonPulses::NONE);
//! }
//! assert_eq!(game.mode(), GameMode::Play);
//! assert_eq!(game.score().value(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::step`](game_state::GameState::step) once per master
//! tick. Rates come from [`ClockConfig`](lane_dodge_types::ClockConfig);
//! with the default 6 kHz master a real-time loop steps 6000 times a second.

pub mod clock;
pub mod display;
pub mod game_state;
pub mod mode;
pub mod obstacles;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use lane_dodge_types as types;

// Re-export commonly used types for convenience
pub use clock::{ClockDivider, EdgeDetector, PulseGenerator, TickFabric};
pub use display::{compose, LOST_GLYPHS};
pub use game_state::{GameEvent, GameState, StepReport};
pub use mode::{ModeFsm, ModeInputs};
pub use obstacles::{ObstaclePipeline, ObstacleTrack};
pub use player::Player;
pub use rng::LaneLfsr;
pub use scoring::{obstacle_passed, BcdScore, CollisionLatch};
pub use snapshot::GameSnapshot;
