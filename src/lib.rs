//! Lane dodge (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests and
//! benches can use `lane_dodge::{core,engine,input,term,types}`.

pub use lane_dodge_core as core;
pub use lane_dodge_engine as engine;
pub use lane_dodge_input as input;
pub use lane_dodge_term as term;
pub use lane_dodge_types as types;
