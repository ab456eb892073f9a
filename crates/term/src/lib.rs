//! Terminal rendering for blockfall.
//!
//! A small, game-oriented rendering layer: the game is drawn into a character
//! framebuffer by a pure [`GameView`], and [`TerminalRenderer`] flushes that
//! buffer to the terminal through `crossterm`.
//!
//! - Keep `core` deterministic and free of I/O
//! - Draw two terminal columns per board cell to square up the cells

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
