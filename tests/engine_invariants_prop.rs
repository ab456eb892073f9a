//! Property tests for the engine.
//!
//! Invariants covered:
//! - Four clockwise quarter turns are the identity for every shape.
//! - A placement judged valid lies fully inside the board on empty cells.
//! - Compaction removes exactly the flagged rows and keeps the others in order.
//! - Random rollouts keep the board well-formed, counters consistent and time
//!   monotonic, whatever the input and frame timing.

use proptest::prelude::*;

use blockfall::core::{Board, FullLines, GameConfig, GameState, Piece, PlayMode, Randomizer};
use blockfall::types::{
    Button, GamePhase, InputState, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH,
};

const HEIGHT: usize = BOARD_HEIGHT as usize;
const WIDTH: usize = BOARD_WIDTH as usize;

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn rotation_strategy() -> impl Strategy<Value = Rotation> {
    (0u8..4).prop_map(Rotation::from_quarter_turns)
}

fn rows_strategy() -> impl Strategy<Value = Vec<[u8; WIDTH]>> {
    prop::collection::vec(prop::array::uniform10(0u8..=7), HEIGHT)
}

fn board_from(rows: &[[u8; WIDTH]]) -> Board {
    let mut board = Board::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            board.set(r as i8, c as i8, v);
        }
    }
    board
}

fn row_of(board: &Board, row: usize) -> Vec<u8> {
    (0..WIDTH).map(|c| board.get(row as i8, c as i8).unwrap_or(0)).collect()
}

proptest! {
    #[test]
    fn four_turns_are_identity(kind in kind_strategy(), start in rotation_strategy()) {
        let piece = Piece { kind, rotation: start, row: 3, col: 3 };
        let turned = piece.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        prop_assert_eq!(turned, piece);
        prop_assert_eq!(start.rotate_cw().rotate_ccw(), start);
    }

    #[test]
    fn valid_placement_is_sound(
        kind in kind_strategy(),
        rotation in rotation_strategy(),
        row in -4i8..24,
        col in -4i8..12,
        rows in rows_strategy(),
    ) {
        let board = board_from(&rows);
        let piece = Piece { kind, rotation, row, col };
        if board.is_valid_placement(&piece) {
            for (r, c, _) in piece.cells() {
                prop_assert!((0..BOARD_HEIGHT as i8).contains(&r));
                prop_assert!((0..BOARD_WIDTH as i8).contains(&c));
                prop_assert_eq!(board.get(r, c), Some(0));
            }
        } else {
            let blocked = piece.cells().any(|(r, c, _)| board.get(r, c) != Some(0));
            prop_assert!(blocked);
        }
    }

    #[test]
    fn compaction_removes_exactly_flagged_rows(
        rows in rows_strategy(),
        flagged in prop::collection::vec(any::<bool>(), HEIGHT),
    ) {
        let mut board = board_from(&rows);
        let flagged_rows: Vec<usize> = flagged
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(r, _)| r)
            .collect();
        let lines = FullLines::from_rows(&flagged_rows);

        let kept: Vec<Vec<u8>> = (0..HEIGHT)
            .filter(|r| !lines.is_full(*r))
            .map(|r| row_of(&board, r))
            .collect();

        board.compact(&lines);

        let cleared = lines.count();
        for r in 0..cleared {
            prop_assert!(board.is_row_empty(r));
        }
        for (i, expected) in kept.iter().enumerate() {
            prop_assert_eq!(&row_of(&board, cleared + i), expected);
        }
    }

    #[test]
    fn rollout_respects_core_invariants(
        seed in any::<u32>(),
        bag in any::<bool>(),
        perpetual in any::<bool>(),
        steps in prop::collection::vec((0u8..32, 0u32..120), 1..300),
    ) {
        let config = GameConfig::default()
            .with_seed(seed)
            .with_randomizer(if bag { Randomizer::Bag7 } else { Randomizer::Uniform })
            .with_mode(if perpetual { PlayMode::Perpetual } else { PlayMode::Classic });
        let mut game = GameState::with_config(config);
        let mut t = 0.0;
        let mut last_score = 0;
        let mut last_lines = 0;

        for (mask, ms) in steps {
            let pressed: Vec<Button> = Button::ALL
                .iter()
                .copied()
                .filter(|b| mask & (1 << b.index()) != 0)
                .collect();
            t += ms as f64 / 1000.0;
            let time_before = game.time();
            game.tick(t, &InputState::pressing(&pressed));
            prop_assert!(game.time() >= time_before);

            prop_assert!(game.board().cells().iter().all(|&v| v <= 7));

            let restarted = game.score() < last_score || game.lines() < last_lines;
            if restarted {
                prop_assert_eq!(game.score(), 0);
                prop_assert_eq!(game.lines(), 0);
            }
            prop_assert_eq!(game.level(), game.lines() / 10);
            last_score = game.score();
            last_lines = game.lines();

            match game.phase() {
                GamePhase::Playing => {
                    prop_assert_eq!(game.board().full_lines().count(), 0);
                    prop_assert!(game.next_drop_time().is_some());
                    let active = game.active();
                    prop_assert!(active.is_some());
                    if let Some(piece) = active {
                        for (r, c, _) in piece.cells() {
                            prop_assert!(game.board().get(r, c).is_some());
                        }
                    }
                }
                GamePhase::LineClear => {
                    prop_assert!(game.full_lines().count() > 0);
                    prop_assert!(game.line_clear_time().is_some());
                }
                GamePhase::GameOver => {
                    prop_assert!(!perpetual);
                    prop_assert!(game.board().hidden_rows_occupied());
                }
                GamePhase::Start => prop_assert!(!perpetual),
            }
        }
    }
}
