//! Per-tick button sampling for terminals.
//!
//! Key events arrive between ticks; [`InputSampler::record`] collects the
//! buttons pressed since the last tick and [`InputSampler::finish_tick`] diffs
//! them against the previous tick's sample.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::button_for_key;
use crate::types::{Button, ButtonSample, InputState};

/// Presses kept per tick; extra events in the same tick are dropped.
const MAX_PRESSES_PER_TICK: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    previous: ButtonSample,
    pending: ArrayVec<Button, MAX_PRESSES_PER_TICK>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a key event. Returns the button it maps to, if any.
    ///
    /// Repeat and release events are ignored: a key that keeps auto-repeating
    /// reads as held, and held buttons do not act again.
    pub fn record(&mut self, key: KeyEvent) -> Option<Button> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let button = button_for_key(key.code)?;
        // A full buffer only loses duplicates of presses already seen this tick.
        let _ = self.pending.try_push(button);
        Some(button)
    }

    /// Close the current tick and produce its edge-triggered input.
    pub fn finish_tick(&mut self) -> InputState {
        let mut current = ButtonSample::new();
        for &button in &self.pending {
            current.set(button, true);
        }
        self.pending.clear();

        let input = InputState::from_samples(&self.previous, &current);
        self.previous = current;
        input
    }

    /// Sample used as the baseline for the next tick.
    pub fn previous(&self) -> &ButtonSample {
        &self.previous
    }
}
