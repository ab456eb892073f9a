//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events onto the engine's five logical buttons and turns
//! one tick's worth of events into an edge-triggered [`crate::types::InputState`].
//! Terminals rarely report key releases, so a button counts as held for a tick
//! only when a press for it arrived during that tick.

pub mod map;
pub mod sampler;

pub use blockfall_types as types;

pub use map::{button_for_key, should_quit};
pub use sampler::InputSampler;
