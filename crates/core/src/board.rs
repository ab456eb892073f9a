//! Board module - manages the game grid
//!
//! The board is a 10x22 grid of cell values (0 empty, 1-7 piece kind). The top
//! [`HIDDEN_ROWS`] rows sit above the visible playfield and exist only to detect
//! top-outs. Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates: `(row, col)` with row 0 at the top.

use arrayvec::ArrayVec;

use crate::grid;
use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Per-row "is full" flags plus their count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullLines {
    flags: [bool; HEIGHT],
    count: usize,
}

impl FullLines {
    pub fn none() -> Self {
        Self {
            flags: [false; HEIGHT],
            count: 0,
        }
    }

    /// Flags built from explicit row indices. Rows outside the board are skipped.
    pub fn from_rows(rows: &[usize]) -> Self {
        let mut out = Self::none();
        for &row in rows {
            if let Some(flag) = out.flags.get_mut(row) {
                if !*flag {
                    *flag = true;
                    out.count += 1;
                }
            }
        }
        out
    }

    pub fn is_full(&self, row: usize) -> bool {
        self.flags.get(row).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn flags(&self) -> &[bool; HEIGHT] {
        &self.flags
    }

    /// Indices of the flagged rows, top to bottom.
    pub fn rows(&self) -> ArrayVec<u8, HEIGHT> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, full)| **full)
            .map(|(row, _)| row as u8)
            .collect()
    }
}

impl Default for FullLines {
    fn default() -> Self {
        Self::none()
    }
}

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    #[inline(always)]
    fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && (row as usize) < HEIGHT && col >= 0 && (col as usize) < WIDTH
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::in_bounds(row, col).then(|| grid::get(&self.cells, WIDTH, row as usize, col as usize))
    }

    /// Set cell at `(row, col)`; returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, value: Cell) -> bool {
        if !Self::in_bounds(row, col) {
            return false;
        }
        grid::set(&mut self.cells, WIDTH, row as usize, col as usize, value);
        true
    }

    /// Fill every cell of `row` with `value`.
    pub fn fill_row(&mut self, row: usize, value: Cell) {
        let start = grid::index(WIDTH, row, 0);
        self.cells[start..start + WIDTH].fill(value);
    }

    /// True when every cell of `piece` lies inside the board on an empty cell.
    ///
    /// Empty cells of the piece bitmap impose no constraint, so a piece may hang
    /// past an edge with its blank columns.
    pub fn is_valid_placement(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .all(|(row, col, _)| matches!(self.get(row, col), Some(0)))
    }

    /// Write the piece's cells into the board.
    ///
    /// Cells outside the board are skipped; callers only lock pieces whose last
    /// position was valid.
    pub fn commit_piece(&mut self, piece: &Piece) {
        for (row, col, value) in piece.cells() {
            self.set(row, col, value);
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        row < HEIGHT && grid::row(&self.cells, WIDTH, row).iter().all(|&c| c != 0)
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        row < HEIGHT && grid::row(&self.cells, WIDTH, row).iter().all(|&c| c == 0)
    }

    /// Flag every full row.
    pub fn full_lines(&self) -> FullLines {
        let mut out = FullLines::none();
        for row in 0..HEIGHT {
            if self.is_row_full(row) {
                out.flags[row] = true;
                out.count += 1;
            }
        }
        out
    }

    /// Any occupied cell above the playfield.
    pub fn hidden_rows_occupied(&self) -> bool {
        (0..HIDDEN_ROWS as usize).any(|row| !self.is_row_empty(row))
    }

    /// Remove flagged rows and drop the rows above them.
    ///
    /// Single bottom-up pass: `dst` walks every row, `src` skips flagged rows.
    /// Rows left without a source are zeroed. With no flags `src == dst`
    /// throughout and nothing moves.
    pub fn compact(&mut self, lines: &FullLines) {
        let mut src = HEIGHT as isize - 1;
        for dst in (0..HEIGHT).rev() {
            while src >= 0 && lines.is_full(src as usize) {
                src -= 1;
            }
            if src < 0 {
                self.fill_row(dst, 0);
                continue;
            }
            let src_row = src as usize;
            if src_row != dst {
                let from = grid::index(WIDTH, src_row, 0);
                self.cells
                    .copy_within(from..from + WIDTH, grid::index(WIDTH, dst, 0));
            }
            src -= 1;
        }
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Copy into a 2D grid (for snapshots/rendering).
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(grid::row(&self.cells, WIDTH, row));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rotation};

    fn piece(kind: PieceKind, rotation: Rotation, row: i8, col: i8) -> Piece {
        Piece {
            kind,
            rotation,
            row,
            col,
        }
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut board = Board::new();
        assert!(board.set(21, 9, 3));
        assert_eq!(board.get(21, 9), Some(3));
        assert_eq!(board.cells[219], 3);

        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, 10), None);
        assert_eq!(board.get(22, 0), None);
        assert!(!board.set(0, -1, 1));
    }

    #[test]
    fn from_rows_skips_duplicates_and_out_of_range() {
        let lines = FullLines::from_rows(&[21, 21, 22, 400, 3]);
        assert_eq!(lines.count(), 2);
        assert!(lines.is_full(21));
        assert!(lines.is_full(3));
        assert!(!lines.is_full(22));
    }

    #[test]
    fn piece_inside_empty_board_is_valid() {
        let board = Board::new();
        assert!(board.is_valid_placement(&piece(PieceKind::T, Rotation::North, 5, 3)));
    }

    #[test]
    fn blank_bitmap_columns_may_hang_off_the_edge() {
        let board = Board::new();
        // East bar fills only local column 2.
        assert!(board.is_valid_placement(&piece(PieceKind::I, Rotation::East, 0, -2)));
        assert!(!board.is_valid_placement(&piece(PieceKind::I, Rotation::East, 0, -3)));
        // North bar fills only local row 1.
        assert!(board.is_valid_placement(&piece(PieceKind::I, Rotation::North, -1, 0)));
        assert!(!board.is_valid_placement(&piece(PieceKind::I, Rotation::North, -2, 0)));
    }

    #[test]
    fn out_of_bounds_cells_are_invalid() {
        let board = Board::new();
        assert!(!board.is_valid_placement(&piece(PieceKind::O, Rotation::North, 21, 0)));
        assert!(!board.is_valid_placement(&piece(PieceKind::O, Rotation::North, 0, 9)));
        assert!(!board.is_valid_placement(&piece(PieceKind::O, Rotation::North, 0, -1)));
    }

    #[test]
    fn overlap_is_invalid() {
        let mut board = Board::new();
        board.set(11, 4, 1);
        assert!(!board.is_valid_placement(&piece(PieceKind::O, Rotation::North, 10, 3)));
        assert!(board.is_valid_placement(&piece(PieceKind::O, Rotation::North, 10, 5)));
    }

    #[test]
    fn commit_writes_piece_values() {
        let mut board = Board::new();
        board.commit_piece(&piece(PieceKind::T, Rotation::North, 19, 0));
        // T north: row 1 full, row 2 middle.
        assert_eq!(board.get(20, 0), Some(5));
        assert_eq!(board.get(20, 1), Some(5));
        assert_eq!(board.get(20, 2), Some(5));
        assert_eq!(board.get(21, 1), Some(5));
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn full_and_empty_rows() {
        let mut board = Board::new();
        board.fill_row(21, 1);
        board.set(20, 0, 2);

        let lines = board.full_lines();
        assert_eq!(lines.count(), 1);
        assert!(lines.is_full(21));
        assert!(!lines.is_full(20));
        assert_eq!(lines.rows().as_slice(), &[21]);

        assert!(board.is_row_empty(0));
        assert!(!board.is_row_empty(20));
        assert!(!board.is_row_empty(21));
    }

    #[test]
    fn compact_without_flags_is_identity() {
        let mut board = Board::new();
        board.set(3, 3, 4);
        board.set(21, 0, 1);
        let before = board.clone();
        board.compact(&FullLines::none());
        assert_eq!(board, before);
    }

    #[test]
    fn compact_removes_rows_two_and_five() {
        let mut board = Board::new();
        // Distinct marker in column 0 of every surviving row.
        for row in 0..HEIGHT {
            board.set(row as i8, 0, (row % 7 + 1) as u8);
        }
        board.fill_row(2, 1);
        board.fill_row(5, 1);

        let lines = board.full_lines();
        assert_eq!(lines.count(), 2);
        board.compact(&lines);

        assert!(board.is_row_empty(0));
        assert!(board.is_row_empty(1));
        // Rows below 5 untouched.
        for row in 6..HEIGHT {
            assert_eq!(board.get(row as i8, 0), Some((row % 7 + 1) as u8));
        }
        // Rows 3,4 shift down by one; rows 0,1 by two.
        assert_eq!(board.get(5, 0), Some(5));
        assert_eq!(board.get(4, 0), Some(4));
        assert_eq!(board.get(3, 0), Some(2));
        assert_eq!(board.get(2, 0), Some(1));
        assert_eq!(board.full_lines().count(), 0);
    }

    #[test]
    fn compact_all_full_zeroes_board() {
        let mut board = Board::new();
        for row in 0..HEIGHT {
            board.fill_row(row, 7);
        }
        let lines = board.full_lines();
        assert_eq!(lines.count(), HEIGHT);
        board.compact(&lines);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn hidden_rows_detect_top_out() {
        let mut board = Board::new();
        board.set(HIDDEN_ROWS as i8, 4, 1);
        assert!(!board.hidden_rows_occupied());
        board.set(HIDDEN_ROWS as i8 - 1, 4, 1);
        assert!(board.hidden_rows_occupied());
    }
}
