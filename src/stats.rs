//! Tally of a play session, printed once the terminal is restored.

use crate::types::GameEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub games: u32,
    pub pieces: u32,
    pub lines: u32,
    pub tetrises: u32,
    pub best_score: u32,
    pub best_lines: u32,
    /// Score of the game still in progress.
    current_score: u32,
    current_lines: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Started | GameEvent::Restarted => {
                self.games += 1;
                self.current_score = 0;
                self.current_lines = 0;
            }
            GameEvent::Locked { .. } => self.pieces += 1,
            GameEvent::LinesFull { .. } => {}
            GameEvent::LinesCleared { count, points } => {
                self.lines += count as u32;
                if count >= 4 {
                    self.tetrises += 1;
                }
                self.current_score += points;
                self.current_lines += count as u32;
                self.keep_best(self.current_score, self.current_lines);
            }
            GameEvent::ToppedOut { score, lines } => self.keep_best(score, lines),
        }
    }

    fn keep_best(&mut self, score: u32, lines: u32) {
        if score > self.best_score || (score == self.best_score && lines > self.best_lines) {
            self.best_score = score;
            self.best_lines = lines;
        }
    }

    /// One-line summary, `[Blockfall]`-prefixed.
    pub fn summary(&self) -> String {
        format!(
            "[Blockfall] games={} pieces={} lines={} tetrises={} best_score={} best_lines={}",
            self.games, self.pieces, self.lines, self.tetrises, self.best_score, self.best_lines
        )
    }
}
