//! Session configuration.

use crate::rng::Randomizer;
use crate::types::{LINES_PER_LEVEL, LINE_CLEAR_DELAY_SECS, LINE_SCORES, MAX_DROPS_PER_TICK};

/// Which variant of the phase machine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// START -> PLAYING <-> LINE_CLEAR -> GAME_OVER -> START.
    #[default]
    Classic,
    /// No title or game-over screens: play begins immediately and a top-out
    /// wipes the board in place.
    Perpetual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub seed: u32,
    pub randomizer: Randomizer,
    pub mode: PlayMode,
    pub start_level: u32,
    pub lines_per_level: u32,
    /// Seconds the full rows stay on screen before they are removed.
    pub line_clear_delay: f64,
    /// Points indexed by rows cleared at once.
    pub point_values: [u32; 5],
    /// Cap on gravity drops per update.
    pub max_drops_per_tick: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::Uniform,
            mode: PlayMode::Classic,
            start_level: 0,
            lines_per_level: LINES_PER_LEVEL,
            line_clear_delay: LINE_CLEAR_DELAY_SECS,
            point_values: LINE_SCORES,
            max_drops_per_tick: MAX_DROPS_PER_TICK,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_mode(mut self, mode: PlayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level;
        self
    }

    pub fn with_max_drops_per_tick(mut self, max: u32) -> Self {
        self.max_drops_per_tick = max.max(1);
        self
    }

    /// Points for clearing `lines` rows at once.
    ///
    /// More than four rows can only come from hand-built boards; they score as four.
    pub fn points_for(&self, lines: usize) -> u32 {
        let last = self.point_values.len() - 1;
        self.point_values[lines.min(last)]
    }

    /// Level reached after `lines` total cleared rows.
    pub fn level_for(&self, lines: u32) -> u32 {
        self.start_level + lines / self.lines_per_level.max(1)
    }
}
