//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole simulation: board, piece catalog, randomizer and
//! the phase machine. It has **no dependencies** on terminals, clocks or input
//! devices:
//!
//! - **Deterministic**: the same seed, time sequence and inputs replay the same game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Allocation-free ticks**: fixed-size board, piece and event storage
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid, placement validity, full-row detection and compaction
//! - [`config`]: per-session rules (seed, randomizer, play mode, levels)
//! - [`game_state`]: the phase machine driven by `set_time` + `update`
//! - [`grid`]: row-major addressing helpers
//! - [`pieces`]: the seven bitmaps and rotation by coordinate remapping
//! - [`rng`]: seeded LCG, uniform and 7-bag randomizers
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - Moves and rotations are rejected outright when blocked; there are no wall kicks
//! - Holding a button never repeats its action; only the press counts
//! - Hard drop locks immediately; there is no lock delay
//! - Full rows stay on screen for a short clear delay, then the stack collapses
//! - Anything left in the two hidden rows above the playfield ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{Button, GamePhase, InputState};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), GamePhase::Start);
//!
//! // Confirm starts play.
//! game.tick(0.0, &InputState::pressing(&[Button::Action]));
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! // Hard drop locks the piece.
//! game.tick(0.016, &InputState::pressing(&[Button::Action]));
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullLines};
pub use config::{GameConfig, PlayMode};
pub use game_state::{GameState, EVENT_CAPACITY};
pub use pieces::{filled_cells, shape, shape_cell_at, Piece, Shape, CATALOG};
pub use rng::{PiecePicker, Randomizer, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
