//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,term,types}` and
//! hosts the pieces of the binary that are worth testing on their own: option
//! parsing and the end-of-session summary.

pub mod cli;
pub mod stats;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
