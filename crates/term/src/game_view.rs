//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. Only the playable rows are drawn;
//! the hidden rows above them never reach the screen.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, PLAYABLE_HEIGHT};

pub const BLOCK: char = '█';
pub const GHOST: char = '░';
pub const FLASH: char = '▓';
pub const EMPTY: char = '·';

pub const START_TEXT: &str = "PRESS SPACE TO START";
pub const GAME_OVER_TEXT: &str = "GAME OVER";

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Lays out the well, side panel and overlays.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the cells in common fonts.
        Self { cell_w: 2 }
    }
}

impl GameView {
    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            PLAYABLE_HEIGHT as u16 + 2,
        )
    }

    /// Top-left corner of the well's border.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (w, h) = self.frame_size();
        (
            viewport.width.saturating_sub(w) / 2,
            viewport.height.saturating_sub(h) / 2,
        )
    }

    /// Terminal position of board cell `(row, col)`; `None` for hidden or
    /// out-of-range cells.
    pub fn cell_origin(&self, viewport: Viewport, row: i8, col: i8) -> Option<(u16, u16)> {
        if row < HIDDEN_ROWS as i8 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        let (x0, y0) = self.frame_origin(viewport);
        let x = x0 + 1 + col as u16 * self.cell_w;
        let y = y0 + 1 + (row as u16 - HIDDEN_ROWS as u16);
        Some((x, y))
    }

    pub fn render(&self, snapshot: &GameSnapshot, flash: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snapshot, flash, &mut fb);
        fb
    }

    /// Draw a frame into `fb`, using its current size as the viewport.
    ///
    /// `flash` selects the highlighted half of the line-clear blink.
    pub fn render_into(&self, snapshot: &GameSnapshot, flash: bool, fb: &mut FrameBuffer) {
        let viewport = Viewport::new(fb.width(), fb.height());
        fb.clear(Glyph::default());

        let (x0, y0) = self.frame_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();
        self.draw_border(fb, x0, y0, frame_w, frame_h);

        self.draw_board(fb, viewport, snapshot, flash);

        if snapshot.shows_piece() {
            if let Some(active) = snapshot.active {
                let piece = Piece::from(active);
                if let Some(ghost_row) = snapshot.ghost_row {
                    let ghost = Piece { row: ghost_row, ..piece };
                    let style = Style::new(kind_color(piece.kind), WELL_BG).dim();
                    self.draw_piece(fb, viewport, &ghost, GHOST, style);
                }
                let style = Style::new(kind_color(piece.kind), WELL_BG).bold();
                self.draw_piece(fb, viewport, &piece, BLOCK, style);
            }
        }

        self.draw_side_panel(fb, snapshot, x0.saturating_add(frame_w).saturating_add(2), y0);

        let overlay = match snapshot.phase {
            GamePhase::Start => Some(START_TEXT),
            GamePhase::GameOver => Some(GAME_OVER_TEXT),
            GamePhase::Playing | GamePhase::LineClear => None,
        };
        if let Some(text) = overlay {
            let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            // The start banner is wider than the well; centre it on the screen.
            fb.put_str_centered(0, viewport.width, y0.saturating_add(frame_h / 2), text, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, viewport: Viewport, snapshot: &GameSnapshot, flash: bool) {
        let empty = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        let flash_style = Style::new(Rgb::new(255, 255, 255), WELL_BG).bold();
        let clearing = snapshot.phase == GamePhase::LineClear;

        for row in HIDDEN_ROWS as usize..BOARD_HEIGHT as usize {
            let row_flashing = clearing && flash && snapshot.full_rows[row];
            for col in 0..BOARD_WIDTH as usize {
                let (ch, style) = if row_flashing {
                    (FLASH, flash_style)
                } else {
                    match PieceKind::from_cell(snapshot.board[row][col]) {
                        Some(kind) => (BLOCK, Style::new(kind_color(kind), WELL_BG)),
                        None => (EMPTY, empty),
                    }
                };
                self.fill_cell(fb, viewport, row as i8, col as i8, ch, style);
            }
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, viewport: Viewport, piece: &Piece, ch: char, style: Style) {
        for (row, col, _) in piece.cells() {
            self.fill_cell(fb, viewport, row, col, ch, style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, viewport: Viewport, row: i8, col: i8, ch: char, style: Style) {
        if let Some((x, y)) = self.cell_origin(viewport, row, col) {
            fb.fill_rect(x, y, self.cell_w, 1, ch, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snapshot: &GameSnapshot, panel_x: u16, y0: u16) {
        if panel_x >= fb.width() {
            return;
        }
        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = y0.saturating_add(1);
        for (name, n) in [
            ("SCORE", snapshot.score),
            ("LINES", snapshot.lines),
            ("LEVEL", snapshot.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y.saturating_add(1), &n.to_string(), value);
            y = y.saturating_add(3);
        }
    }
}

/// Display color per piece kind.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;
    use crate::types::Rotation;

    const VP: Viewport = Viewport { width: 60, height: 24 };

    fn glyph_at(fb: &FrameBuffer, view: &GameView, row: i8, col: i8) -> char {
        let (x, y) = view.cell_origin(VP, row, col).unwrap();
        fb.get(x, y).unwrap().ch
    }

    #[test]
    fn hidden_rows_have_no_position() {
        let view = GameView::default();
        assert_eq!(view.cell_origin(VP, 0, 0), None);
        assert_eq!(view.cell_origin(VP, 1, 9), None);
        assert!(view.cell_origin(VP, 2, 0).is_some());
        assert_eq!(view.cell_origin(VP, 2, 10), None);
    }

    #[test]
    fn playable_rows_fill_the_well() {
        let view = GameView::default();
        let (x0, y0) = view.frame_origin(VP);
        assert_eq!(view.cell_origin(VP, 2, 0), Some((x0 + 1, y0 + 1)));
        assert_eq!(view.cell_origin(VP, 21, 9), Some((x0 + 19, y0 + 20)));
    }

    #[test]
    fn line_clear_blinks_full_rows() {
        let view = GameView::default();
        let mut snap = GameSnapshot {
            phase: GamePhase::LineClear,
            ..GameSnapshot::default()
        };
        snap.board[21] = [3; 10];
        snap.full_rows[21] = true;

        let on = view.render(&snap, true, VP);
        let off = view.render(&snap, false, VP);
        assert_eq!(glyph_at(&on, &view, 21, 4), FLASH);
        assert_eq!(glyph_at(&off, &view, 21, 4), BLOCK);
    }

    #[test]
    fn ghost_drawn_under_active_piece() {
        let view = GameView::default();
        let snap = GameSnapshot {
            phase: GamePhase::Playing,
            active: Some(ActiveSnapshot {
                kind: PieceKind::O,
                rotation: Rotation::North,
                row: 2,
                col: 0,
            }),
            ghost_row: Some(20),
            ..GameSnapshot::default()
        };
        let fb = view.render(&snap, false, VP);
        assert_eq!(glyph_at(&fb, &view, 2, 0), BLOCK);
        assert_eq!(glyph_at(&fb, &view, 21, 1), GHOST);
        assert_eq!(glyph_at(&fb, &view, 10, 0), EMPTY);
    }
}
