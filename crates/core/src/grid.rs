//! Row-major addressing over a flat cell buffer.
//!
//! These helpers do no bounds validation of their own: callers range-check
//! first (see [`crate::board::Board::get`]). An out-of-range index panics on the
//! slice access, which is a programming error rather than a game condition.

use crate::types::Cell;

#[inline(always)]
pub fn index(width: usize, row: usize, col: usize) -> usize {
    row * width + col
}

#[inline(always)]
pub fn get(cells: &[Cell], width: usize, row: usize, col: usize) -> Cell {
    cells[index(width, row, col)]
}

#[inline(always)]
pub fn set(cells: &mut [Cell], width: usize, row: usize, col: usize, value: Cell) {
    cells[index(width, row, col)] = value;
}

/// One full row as a slice.
#[inline(always)]
pub fn row(cells: &[Cell], width: usize, row: usize) -> &[Cell] {
    let start = index(width, row, 0);
    &cells[start..start + width]
}
