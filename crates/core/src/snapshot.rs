use crate::pieces::Piece;
use crate::types::{GamePhase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
        }
    }
}

impl From<ActiveSnapshot> for Piece {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.row,
            col: value.col,
        }
    }
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Rows waiting to be removed (non-empty only during line clear).
    pub full_rows: [bool; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Row offset the active piece would land at.
    pub ghost_row: Option<i8>,
    pub phase: GamePhase,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

impl GameSnapshot {
    /// Whether a falling piece should be drawn.
    pub fn shows_piece(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::LineClear)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            full_rows: [false; BOARD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            phase: GamePhase::Start,
            score: 0,
            lines: 0,
            level: 0,
        }
    }
}
