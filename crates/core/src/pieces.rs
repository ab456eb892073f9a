//! Pieces module - the seven tetromino bitmaps and rotation lookup
//!
//! Each shape is stored once, unrotated, as a square bitmap of side 2, 3 or 4.
//! Rotations are never materialised: [`shape_cell_at`] remaps the requested
//! coordinate into the stored bitmap for each quarter turn.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, Rotation, SPAWN_COL, SPAWN_ROW};

/// Largest bitmap side in the catalog.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Minos in every tetromino.
pub const MINOS: usize = 4;

/// An immutable square bitmap.
///
/// Only the top-left `size x size` block of `cells` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: [Cell; MAX_SHAPE_SIZE * MAX_SHAPE_SIZE],
}

impl Shape {
    const fn new<const N: usize>(size: usize, data: [Cell; N]) -> Self {
        let mut cells = [0; MAX_SHAPE_SIZE * MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < N {
            cells[i] = data[i];
            i += 1;
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Unrotated cell, row-major.
    #[inline(always)]
    fn raw(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }
}

/// The catalog, indexed by [`PieceKind::index`].
#[rustfmt::skip]
pub static CATALOG: [Shape; 7] = [
    // I
    Shape::new(4, [
        0, 0, 0, 0,
        1, 1, 1, 1,
        0, 0, 0, 0,
        0, 0, 0, 0,
    ]),
    // O
    Shape::new(2, [
        2, 2,
        2, 2,
    ]),
    // L
    Shape::new(3, [
        0, 0, 3,
        3, 3, 3,
        0, 0, 0,
    ]),
    // J
    Shape::new(3, [
        4, 0, 0,
        4, 4, 4,
        0, 0, 0,
    ]),
    // T
    Shape::new(3, [
        0, 0, 0,
        5, 5, 5,
        0, 5, 0,
    ]),
    // S
    Shape::new(3, [
        0, 6, 6,
        6, 6, 0,
        0, 0, 0,
    ]),
    // Z
    Shape::new(3, [
        7, 7, 0,
        0, 7, 7,
        0, 0, 0,
    ]),
];

/// Catalog entry for a piece kind.
pub fn shape(kind: PieceKind) -> &'static Shape {
    &CATALOG[kind.index()]
}

/// Cell at local `(row, col)` as if the bitmap were turned `rotation` clockwise.
///
/// Callers keep `row` and `col` below the shape size.
pub fn shape_cell_at(kind: PieceKind, row: usize, col: usize, rotation: Rotation) -> Cell {
    let shape = shape(kind);
    let last = shape.size - 1;
    match rotation {
        Rotation::North => shape.raw(row, col),
        Rotation::East => shape.raw(last - col, row),
        Rotation::South => shape.raw(last - row, last - col),
        Rotation::West => shape.raw(col, last - row),
    }
}

/// Occupied local cells of a rotated shape as `(row, col, value)`, row-major.
pub fn filled_cells(kind: PieceKind, rotation: Rotation) -> ArrayVec<(i8, i8, Cell), MINOS> {
    let size = shape(kind).size();
    let mut out = ArrayVec::new();
    for row in 0..size {
        for col in 0..size {
            let value = shape_cell_at(kind, row, col, rotation);
            if value != 0 {
                out.push((row as i8, col as i8, value));
            }
        }
    }
    out
}

/// Active piece: catalog entry, orientation, and the board offset of the
/// bitmap's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// A piece at the spawn offset, unrotated.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    pub fn shifted(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self
        }
    }

    pub fn rotated_cw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    /// Occupied cells in board coordinates as `(row, col, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Cell)> {
        let (row, col) = (self.row, self.col);
        filled_cells(self.kind, self.rotation)
            .into_iter()
            .map(move |(r, c, v)| (row + r, col + c, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(kind: PieceKind, rotation: Rotation) -> Vec<Vec<Cell>> {
        let size = shape(kind).size();
        (0..size)
            .map(|r| (0..size).map(|c| shape_cell_at(kind, r, c, rotation)).collect())
            .collect()
    }

    #[test]
    fn catalog_sizes() {
        let sizes: Vec<usize> = PieceKind::ALL.iter().map(|k| shape(*k).size()).collect();
        assert_eq!(sizes, vec![4, 2, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn every_shape_has_four_minos_of_its_own_value() {
        for kind in PieceKind::ALL {
            for turns in 0..4 {
                let cells = filled_cells(kind, Rotation::from_quarter_turns(turns));
                assert_eq!(cells.len(), MINOS, "{:?} rotation {}", kind, turns);
                assert!(cells.iter().all(|&(_, _, v)| v == kind.cell_value()));
            }
        }
    }

    #[test]
    fn l_piece_all_rotations() {
        assert_eq!(
            matrix(PieceKind::L, Rotation::North),
            vec![vec![0, 0, 3], vec![3, 3, 3], vec![0, 0, 0]]
        );
        assert_eq!(
            matrix(PieceKind::L, Rotation::East),
            vec![vec![0, 3, 0], vec![0, 3, 0], vec![0, 3, 3]]
        );
        assert_eq!(
            matrix(PieceKind::L, Rotation::South),
            vec![vec![0, 0, 0], vec![3, 3, 3], vec![3, 0, 0]]
        );
        assert_eq!(
            matrix(PieceKind::L, Rotation::West),
            vec![vec![3, 3, 0], vec![0, 3, 0], vec![0, 3, 0]]
        );
    }

    #[test]
    fn piece_cells_are_offset_into_board_space() {
        let piece = Piece {
            kind: PieceKind::O,
            rotation: Rotation::North,
            row: 3,
            col: 7,
        };
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(3, 7, 2), (3, 8, 2), (4, 7, 2), (4, 8, 2)]);
    }

    #[test]
    fn spawn_is_unrotated_at_spawn_offset() {
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!((piece.row, piece.col), (SPAWN_ROW, SPAWN_COL));
    }
}
