//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input adapters).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), of which the top 2 are hidden
//! - **Spawn position**: row 0, column `BOARD_WIDTH / 2`
//!
//! # Timing
//!
//! The engine is driven by wall-clock seconds supplied by the caller. Gravity is
//! expressed in 60 Hz frames per drop and converted with [`SECONDS_PER_FRAME`].
//!
//! | Level | Frames per drop |
//! |-------|-----------------|
//! | 0 | 48 (0.8s) |
//! | 1 | 43 |
//! | 5 | 23 |
//! | 9 | 6 |
//! | 19-28 | 2 |
//! | 29+ | 1 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_cell(5), Some(piece));
//! assert_eq!(piece.cell_value(), 5);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Total board height in cells, hidden rows included (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows visible to the player (20 rows)
pub const PLAYABLE_HEIGHT: u8 = 20;

/// Rows above the playable area; any occupied cell here tops the game out.
pub const HIDDEN_ROWS: u8 = BOARD_HEIGHT - PLAYABLE_HEIGHT;

/// Row offset of a freshly spawned piece.
pub const SPAWN_ROW: i8 = 0;

/// Column offset of a freshly spawned piece.
pub const SPAWN_COL: i8 = (BOARD_WIDTH / 2) as i8;

/// Length of one simulation frame in seconds.
pub const SECONDS_PER_FRAME: f64 = 1.0 / 60.0;

/// Duration of the line-clear animation in seconds.
pub const LINE_CLEAR_DELAY_SECS: f64 = 0.1;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Upper bound on gravity drops executed by a single update.
pub const MAX_DROPS_PER_TICK: u32 = PLAYABLE_HEIGHT as u32;

/// Frames per gravity drop, indexed by level.
///
/// Levels past the end of the table use [`MIN_FRAMES_PER_DROP`].
pub const FRAMES_PER_DROP: [u32; 29] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, 5, 5, 5, 4, 4, 4, 3, 3, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
];

/// Gravity floor for very high levels.
pub const MIN_FRAMES_PER_DROP: u32 = 1;

/// Line clear scoring table, indexed by lines cleared at once.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Seconds between gravity drops at `level`.
pub fn drop_interval_secs(level: u32) -> f64 {
    let frames = FRAMES_PER_DROP
        .get(level as usize)
        .copied()
        .unwrap_or(MIN_FRAMES_PER_DROP);
    frames as f64 * SECONDS_PER_FRAME
}

/// A board cell: 0 is empty, 1-7 is the [`PieceKind::cell_value`] that filled it.
pub type Cell = u8;

/// The seven tetromino piece kinds, in catalog order.
///
/// The discriminant is the catalog index; the board stores `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Straight bar, 4x4 bitmap
    I = 0,
    /// Square, 2x2 bitmap
    O = 1,
    L = 2,
    /// Reverse L
    J = 3,
    T = 4,
    /// Skew
    S = 5,
    /// Reverse skew
    Z = 6,
}

impl PieceKind {
    /// Every kind in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Catalog index (0-6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Value written into board cells occupied by this kind (1-7).
    pub fn cell_value(self) -> Cell {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]. Returns `None` for empty cells.
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_cell(0), None);
    /// assert_eq!(PieceKind::from_cell(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_cell(7), Some(PieceKind::Z));
    /// ```
    pub fn from_cell(value: Cell) -> Option<Self> {
        match value {
            1..=7 => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }
}

/// Quarter-turn orientation of a piece.
///
/// - **North**: spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Rotation {
    /// Build from a quarter-turn count; only the low two bits are used.
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_quarter_turns(1), Rotation::East);
    /// assert_eq!(Rotation::from_quarter_turns(4), Rotation::North);
    /// ```
    pub fn from_quarter_turns(turns: u8) -> Self {
        match turns & 0b11 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Number of clockwise quarter turns from North (0-3).
    pub fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + 3)
    }
}

/// Phase of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Waiting for the player to confirm.
    Start,
    Playing,
    /// Full rows are flashing; input is ignored until the delay elapses.
    LineClear,
    GameOver,
}

/// Notable simulation events, drained by observers after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// START -> PLAYING.
    Started,
    /// A piece was written into the board at its final offset.
    Locked { kind: PieceKind, row: i8, col: i8 },
    /// Full rows were detected and the clear animation began.
    LinesFull { count: u8 },
    /// Full rows were removed and scored.
    LinesCleared { count: u8, points: u32 },
    /// The hidden rows were occupied.
    ToppedOut { score: u32, lines: u32 },
    /// Perpetual mode wiped the board after a top-out.
    Restarted,
}

/// Logical buttons the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left = 0,
    Right = 1,
    /// Rotate clockwise.
    Up = 2,
    /// Soft drop.
    Down = 3,
    /// Hard drop, start, confirm.
    Action = 4,
}

impl Button {
    pub const COUNT: usize = 5;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Action,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Raw held/not-held state of every button at one instant.
///
/// Produced by input adapters; the engine never sees it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ButtonSample {
    held: [bool; Button::COUNT],
}

impl ButtonSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn set(&mut self, button: Button, held: bool) {
        self.held[button.index()] = held;
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }
}

/// Edge-triggered input for one update.
///
/// Each button carries a delta against the previous sample: `+1` just pressed,
/// `-1` just released, `0` unchanged. Only presses trigger actions, so holding a
/// key never auto-repeats.
///
/// ```
/// use blockfall_types::{Button, ButtonSample, InputState};
///
/// let prev = ButtonSample::new().with(Button::Left);
/// let cur = ButtonSample::new().with(Button::Left).with(Button::Up);
/// let input = InputState::from_samples(&prev, &cur);
///
/// assert!(input.pressed(Button::Up));
/// assert!(!input.pressed(Button::Left));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct InputState {
    delta: [i8; Button::COUNT],
}

impl InputState {
    /// No button changed.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Diff two consecutive samples.
    pub fn from_samples(previous: &ButtonSample, current: &ButtonSample) -> Self {
        let mut delta = [0i8; Button::COUNT];
        for button in Button::ALL {
            delta[button.index()] =
                current.is_held(button) as i8 - previous.is_held(button) as i8;
        }
        Self { delta }
    }

    /// Input with exactly the given buttons just pressed.
    pub fn pressing(buttons: &[Button]) -> Self {
        let mut delta = [0i8; Button::COUNT];
        for button in buttons {
            delta[button.index()] = 1;
        }
        Self { delta }
    }

    pub fn delta(&self, button: Button) -> i8 {
        self.delta[button.index()]
    }

    /// True only on the tick the button went down.
    pub fn pressed(&self, button: Button) -> bool {
        self.delta(button) > 0
    }

    pub fn released(&self, button: Button) -> bool {
        self.delta(button) < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_geometry_defaults() {
        assert_eq!(HIDDEN_ROWS, 2);
        assert_eq!(SPAWN_COL, 5);
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }

    #[test]
    fn drop_interval_follows_frame_table() {
        assert!((drop_interval_secs(0) - 0.8).abs() < 1e-9);
        assert!((drop_interval_secs(9) - 0.1).abs() < 1e-9);
        assert!((drop_interval_secs(28) - 2.0 / 60.0).abs() < 1e-9);
        assert!((drop_interval_secs(29) - 1.0 / 60.0).abs() < 1e-9);
        assert!((drop_interval_secs(500) - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn cell_values_roundtrip_through_kind() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_cell(kind.cell_value()), Some(*kind));
        }
        assert_eq!(PieceKind::from_cell(8), None);
    }

    #[test]
    fn rotation_cycles_through_four_states() {
        let mut r = Rotation::North;
        for expected in [Rotation::East, Rotation::South, Rotation::West, Rotation::North] {
            r = r.rotate_cw();
            assert_eq!(r, expected);
        }
        assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    }

    #[test]
    fn input_deltas_track_edges() {
        let held = ButtonSample::new().with(Button::Down);
        let none = ButtonSample::new();

        let press = InputState::from_samples(&none, &held);
        assert_eq!(press.delta(Button::Down), 1);
        assert!(press.pressed(Button::Down));

        let hold = InputState::from_samples(&held, &held);
        assert_eq!(hold.delta(Button::Down), 0);
        assert!(!hold.pressed(Button::Down));

        let release = InputState::from_samples(&held, &none);
        assert_eq!(release.delta(Button::Down), -1);
        assert!(release.released(Button::Down));
    }
}
