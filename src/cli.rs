//! Command-line options.

use clap::Parser;

use crate::core::{GameConfig, PlayMode, Randomizer};

/// Environment variable consulted when `--seed` is absent.
pub const SEED_ENV: &str = "BLOCKFALL_SEED";

const KEYS: &str = "\
Keys: arrows/WASD/HJKL move, up rotates, down soft-drops,
      space/enter hard-drops and confirms, q/esc quits.";

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "blockfall", version, about = "Falling-block puzzle in the terminal", after_help = KEYS)]
pub struct Options {
    /// Seed for the piece randomizer. If omitted, one is taken from the clock.
    #[arg(long, env = SEED_ENV)]
    pub seed: Option<u32>,

    /// Starting level
    #[arg(long, default_value_t = 0)]
    pub level: u32,

    /// Draw pieces from shuffled bags of seven
    #[arg(long)]
    pub bag: bool,

    /// Skip title and game-over screens; restart in place on top-out
    #[arg(long)]
    pub perpetual: bool,
}

impl Options {
    pub fn randomizer(&self) -> Randomizer {
        if self.bag {
            Randomizer::Bag7
        } else {
            Randomizer::Uniform
        }
    }

    pub fn mode(&self) -> PlayMode {
        if self.perpetual {
            PlayMode::Perpetual
        } else {
            PlayMode::Classic
        }
    }

    /// Build the session config, using `fallback_seed` when no seed was chosen.
    pub fn into_config(self, fallback_seed: u32) -> GameConfig {
        GameConfig::default()
            .with_seed(self.seed.unwrap_or(fallback_seed))
            .with_start_level(self.level)
            .with_randomizer(self.randomizer())
            .with_mode(self.mode())
    }
}
