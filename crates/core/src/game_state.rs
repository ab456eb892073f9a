//! Game state module - the phase machine
//!
//! One [`GameState`] owns a whole session: board, active piece, score and the
//! phase-specific timers. Callers write the current time with
//! [`GameState::set_time`] and advance the simulation with
//! [`GameState::update`], once per tick. Nothing here reads a clock or a device.
//!
//! Phases and the edges between them:
//!
//! | From | Edge | To |
//! |------|------|----|
//! | Start | confirm pressed | Playing |
//! | Playing | full rows detected | LineClear |
//! | LineClear | clear delay elapsed | Playing |
//! | Playing / LineClear | hidden rows occupied | GameOver |
//! | GameOver | confirm pressed | Start |
//!
//! Each edge's side effects are applied in one place, `GameState::transition`.

use arrayvec::{ArrayVec, Drain};

use crate::board::{Board, FullLines};
use crate::config::{GameConfig, PlayMode};
use crate::pieces::Piece;
use crate::rng::PiecePicker;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{drop_interval_secs, Button, GameEvent, GamePhase, InputState};

/// Undrained events kept per session; the oldest is dropped when full.
pub const EVENT_CAPACITY: usize = 64;

/// Phase plus the one timer that is meaningful in it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Start,
    Playing { next_drop_at: f64 },
    LineClear { clear_at: f64 },
    GameOver,
}

impl Phase {
    fn public(&self) -> GamePhase {
        match self {
            Phase::Start => GamePhase::Start,
            Phase::Playing { .. } => GamePhase::Playing,
            Phase::LineClear { .. } => GamePhase::LineClear,
            Phase::GameOver => GamePhase::GameOver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Begin,
    LinesFull,
    LinesCleared,
    TopOut,
    Reset,
}

/// Result of one step of the drop procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropOutcome {
    /// The piece moved down one row.
    Falling,
    /// The piece could not move; it was written into the board and replaced.
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropCause {
    Gravity,
    Player,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    full_lines: FullLines,
    active: Option<Piece>,
    phase: Phase,
    picker: PiecePicker,
    score: u32,
    lines: u32,
    level: u32,
    /// Simulation time in seconds, supplied by the caller.
    time: f64,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a classic game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig::default().with_seed(seed))
    }

    pub fn with_config(config: GameConfig) -> Self {
        let picker = PiecePicker::new(config.randomizer, config.seed);
        let level = config.start_level;
        let mut state = Self {
            config,
            board: Board::new(),
            full_lines: FullLines::none(),
            active: None,
            phase: Phase::Start,
            picker,
            score: 0,
            lines: 0,
            level,
            time: 0.0,
            events: ArrayVec::new(),
        };
        if state.config.mode == PlayMode::Perpetual {
            state.transition(Transition::Begin);
        }
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.public()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rows flagged full on the last playing tick.
    pub fn full_lines(&self) -> &FullLines {
        &self.full_lines
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Scheduled gravity time; only meaningful while playing.
    pub fn next_drop_time(&self) -> Option<f64> {
        match self.phase {
            Phase::Playing { next_drop_at } => Some(next_drop_at),
            _ => None,
        }
    }

    /// End of the line-clear animation; only meaningful while clearing.
    pub fn line_clear_time(&self) -> Option<f64> {
        match self.phase {
            Phase::LineClear { clear_at } => Some(clear_at),
            _ => None,
        }
    }

    /// Seconds between gravity drops at the current level.
    pub fn drop_interval(&self) -> f64 {
        drop_interval_secs(self.level)
    }

    /// Drain events recorded since the last call, oldest first.
    ///
    /// At most [`EVENT_CAPACITY`] are kept between drains.
    pub fn take_events(&mut self) -> Drain<'_, GameEvent, EVENT_CAPACITY> {
        self.events.drain(..)
    }

    /// Events waiting to be drained.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Advance the clock. Time never runs backwards; earlier values are ignored.
    pub fn set_time(&mut self, seconds: f64) {
        self.time = self.time.max(seconds);
    }

    /// Convenience for `set_time` followed by `update`.
    pub fn tick(&mut self, seconds: f64, input: &InputState) {
        self.set_time(seconds);
        self.update(input);
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self, input: &InputState) {
        match self.phase {
            Phase::Start => self.update_start(input),
            Phase::Playing { .. } => self.update_playing(input),
            Phase::LineClear { clear_at } => self.update_line_clear(clear_at),
            Phase::GameOver => self.update_game_over(input),
        }
    }

    fn update_start(&mut self, input: &InputState) {
        if input.pressed(Button::Action) {
            self.transition(Transition::Begin);
        }
    }

    fn update_playing(&mut self, input: &InputState) {
        // Shift and rotation form one candidate, accepted or rejected as a whole.
        let d_col = input.pressed(Button::Right) as i8 - input.pressed(Button::Left) as i8;
        let rotate = input.pressed(Button::Up);
        if d_col != 0 || rotate {
            self.try_replace(|p| {
                let moved = p.shifted(0, d_col);
                if rotate {
                    moved.rotated_cw()
                } else {
                    moved
                }
            });
        }
        if input.pressed(Button::Down) {
            self.drop_step(DropCause::Player);
        }
        if input.pressed(Button::Action) {
            self.hard_drop();
        }

        self.apply_gravity();

        self.full_lines = self.board.full_lines();
        if self.full_lines.count() > 0 {
            self.transition(Transition::LinesFull);
        }
        if self.board.hidden_rows_occupied() {
            self.transition(Transition::TopOut);
        }
    }

    fn update_line_clear(&mut self, clear_at: f64) {
        if self.time >= clear_at {
            self.transition(Transition::LinesCleared);
        }
    }

    fn update_game_over(&mut self, input: &InputState) {
        if input.pressed(Button::Action) {
            self.transition(Transition::Reset);
        }
    }

    /// Apply a phase edge and its side effects.
    fn transition(&mut self, edge: Transition) {
        match (self.phase(), edge) {
            (GamePhase::Start, Transition::Begin) => {
                self.reset_session();
                self.push_event(GameEvent::Started);
            }
            (GamePhase::Playing, Transition::LinesFull) => {
                self.phase = Phase::LineClear {
                    clear_at: self.time + self.config.line_clear_delay,
                };
                self.push_event(GameEvent::LinesFull {
                    count: self.full_lines.count() as u8,
                });
            }
            (GamePhase::LineClear, Transition::LinesCleared) => {
                let count = self.full_lines.count();
                self.board.compact(&self.full_lines);
                self.full_lines = FullLines::none();

                let points = self.config.points_for(count);
                self.lines += count as u32;
                self.score += points;
                self.level = self.config.level_for(self.lines);

                self.phase = Phase::Playing {
                    next_drop_at: self.time + self.drop_interval(),
                };
                self.push_event(GameEvent::LinesCleared {
                    count: count as u8,
                    points,
                });
            }
            (GamePhase::Playing | GamePhase::LineClear, Transition::TopOut) => {
                self.push_event(GameEvent::ToppedOut {
                    score: self.score,
                    lines: self.lines,
                });
                match self.config.mode {
                    PlayMode::Classic => {
                        self.phase = Phase::GameOver;
                        self.active = None;
                        self.full_lines = FullLines::none();
                    }
                    PlayMode::Perpetual => {
                        self.reset_session();
                        self.push_event(GameEvent::Restarted);
                    }
                }
            }
            (GamePhase::GameOver, Transition::Reset) => {
                // The board is wiped on the next Begin, not here.
                self.phase = Phase::Start;
            }
            (phase, edge) => unreachable!("no {:?} edge out of {:?}", edge, phase),
        }
    }

    /// Zero the board and counters and put a fresh piece in play.
    fn reset_session(&mut self) {
        self.board.clear();
        self.full_lines = FullLines::none();
        self.score = 0;
        self.lines = 0;
        self.level = self.config.start_level;
        self.phase = Phase::Playing {
            next_drop_at: self.time + self.drop_interval(),
        };
        self.spawn_piece();
    }

    /// Replace the active piece with a new kind at the spawn offset.
    fn spawn_piece(&mut self) {
        let kind = self.picker.draw();
        self.active = Some(Piece::spawn(kind));
        self.schedule_drop(self.time + self.drop_interval());
    }

    fn schedule_drop(&mut self, at: f64) {
        if let Phase::Playing { next_drop_at } = &mut self.phase {
            *next_drop_at = at;
        }
    }

    /// Swap in `f(active)` if that placement is valid; no wall kicks.
    fn try_replace(&mut self, f: impl FnOnce(Piece) -> Piece) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = f(active);
        if self.board.is_valid_placement(&candidate) {
            self.active = Some(candidate);
            return true;
        }
        false
    }

    /// Move the piece down one row, or lock it and spawn the next one.
    fn drop_step(&mut self, cause: DropCause) -> DropOutcome {
        let Some(active) = self.active else {
            return DropOutcome::Locked;
        };

        let moved = active.shifted(1, 0);
        if self.board.is_valid_placement(&moved) {
            self.active = Some(moved);
            let base = match (cause, self.next_drop_time()) {
                // Gravity advances from the missed deadline so long frames catch up.
                (DropCause::Gravity, Some(previous)) => previous,
                _ => self.time,
            };
            self.schedule_drop(base + self.drop_interval());
            return DropOutcome::Falling;
        }

        self.board.commit_piece(&active);
        self.push_event(GameEvent::Locked {
            kind: active.kind,
            row: active.row,
            col: active.col,
        });
        self.spawn_piece();
        DropOutcome::Locked
    }

    fn hard_drop(&mut self) {
        // Terminates: every Falling step moves the piece down one row.
        while self.drop_step(DropCause::Player) == DropOutcome::Falling {}
    }

    fn apply_gravity(&mut self) {
        let mut drops = 0;
        while let Some(next_drop_at) = self.next_drop_time() {
            if self.time < next_drop_at {
                break;
            }
            if drops >= self.config.max_drops_per_tick {
                self.schedule_drop(self.time + self.drop_interval());
                break;
            }
            self.drop_step(DropCause::Gravity);
            drops += 1;
        }
    }

    /// Where the active piece would land if dropped now.
    pub fn ghost_piece(&self) -> Option<Piece> {
        let mut ghost = self.active?;
        loop {
            let below = ghost.shifted(1, 0);
            if !self.board.is_valid_placement(&below) {
                return Some(ghost);
            }
            ghost = below;
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.full_rows = *self.full_lines.flags();
        out.phase = self.phase();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;

        if out.shows_piece() {
            out.active = self.active.map(ActiveSnapshot::from);
            out.ghost_row = self.ghost_piece().map(|p| p.row);
        } else {
            out.active = None;
            out.ghost_row = None;
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
