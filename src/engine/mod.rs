//! Move resolution for a 4x4 2048 board.
//!
//! Every operation here is pure: it takes a [`Board`] by value and returns a
//! new one. The only randomness lives in [`spawn`], and it is injected by the
//! caller as any `rand::Rng`.
//!
//! ```
//! use tty_2048::engine::{self as GameEngine, Board, Move};
//!
//! let b = Board::from_rows([
//!     [Some(2), Some(2), Some(4), None],
//!     [None; 4],
//!     [None; 4],
//!     [None; 4],
//! ]);
//! let (moved, score) = GameEngine::resolve_move(b, Move::Left, 0);
//! assert_eq!(moved.get(0, 0).value(), Some(4));
//! assert_eq!(moved.get(1, 0).value(), Some(4));
//! assert_eq!(score, 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod line;
pub mod spawn;
pub mod state;

pub use line::collapse_line;
pub use spawn::{new_board, spawn_tile, Spawn};
pub use state::{Board, Cell, CELLS, SIZE};

/// Points accumulated from merges.
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions in the order legality is reported.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Right, Move::Left];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        f.write_str(s)
    }
}

/// Result of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    /// Points earned by merges during this move.
    pub gained: Score,
    /// Whether any cell differs from the input board.
    pub changed: bool,
}

/// Directions that change a board, in [`Move::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegalMoves(Vec<Move>);

impl LegalMoves {
    /// True if at least one direction changes the board.
    #[inline]
    pub fn any(&self) -> bool { !self.0.is_empty() }

    #[inline]
    pub fn contains(&self, dir: Move) -> bool { self.0.contains(&dir) }

    #[inline]
    pub fn as_slice(&self) -> &[Move] { &self.0 }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ { self.0.iter().copied() }
}

impl fmt::Display for LegalMoves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dir) in self.0.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "{dir}")?;
        }
        Ok(())
    }
}

impl Board {
    /// Slide/merge tiles in `dir`. No randomness.
    ///
    /// ```
    /// use tty_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[Some(2), Some(2), Some(2), Some(2)], [None; 4], [None; 4], [None; 4]]);
    /// let out = b.shift(Move::Right);
    /// assert!(out.changed);
    /// assert_eq!(out.gained, 4);
    /// assert_eq!(out.board.get(3, 0).value(), Some(4));
    /// assert_eq!(out.board.get(2, 0).value(), Some(4));
    /// ```
    pub fn shift(self, dir: Move) -> MoveOutcome {
        let mut next = Board::EMPTY;
        let mut gained: Score = 0;
        for line_idx in 0..SIZE {
            let coords = line::line_coords(dir, line_idx);
            let tiles: Vec<u32> = coords
                .iter()
                .filter_map(|&(x, y)| self.get(x, y).value())
                .collect();
            let (collapsed, points) = collapse_line(&tiles);
            gained += points;
            for (&(x, y), value) in coords.iter().zip(collapsed) {
                next = next.with_cell(x, y, Cell::Occupied(value));
            }
        }
        MoveOutcome { board: next, gained, changed: next != self }
    }

    /// Directions that produce a different board, in [`Move::ALL`] order.
    pub fn legal_moves(self) -> LegalMoves {
        LegalMoves(Move::ALL.into_iter().filter(|&dir| self.shift(dir).changed).collect())
    }

    /// Return true if no direction changes the board.
    #[inline]
    pub fn is_game_over(self) -> bool { !self.legal_moves().any() }

    /// True if any cell holds exactly `target`.
    #[inline]
    pub fn has_tile(self, target: u32) -> bool {
        self.to_cells().iter().any(|c| c.value() == Some(target))
    }
}

/// Slide `board` in `direction` and add the merge points to `score`.
pub fn resolve_move(board: Board, direction: Move, score: Score) -> (Board, Score) {
    let out = board.shift(direction);
    (out.board, score + out.gained)
}

/// Report whether any move is possible and which directions are legal.
pub fn legal_directions(board: Board) -> (bool, LegalMoves) {
    let legal = board.legal_moves();
    (legal.any(), legal)
}

/// True if any cell equals `target`.
pub fn is_winner(board: Board, target: u32) -> bool { board.has_tile(target) }
