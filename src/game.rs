//! One game of 2048: board, score and the order in which a turn runs.

use rand::Rng;

use crate::config::GameConfig;
use crate::engine::{self as GameEngine, Board, LegalMoves, Move, Score, Spawn};
use crate::save::Snapshot;

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The chosen direction did not change the board; nothing happened.
    Ignored,
    /// The target tile appeared.
    Won,
    /// The board is full and no direction changes it.
    Lost,
    /// Keep playing.
    Continue,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: Score,
    high_score: Score,
    cfg: GameConfig,
}

impl Game {
    /// Deal a new board with a zero score.
    pub fn new<R: Rng + ?Sized>(cfg: GameConfig, rng: &mut R) -> Self {
        let board = GameEngine::new_board(&cfg, rng);
        Self { board, score: 0, high_score: 0, cfg }
    }

    /// Resume from a persisted snapshot.
    pub fn from_snapshot(snapshot: Snapshot, cfg: GameConfig) -> Self {
        Self {
            board: snapshot.board,
            score: snapshot.score,
            high_score: snapshot.high_score.max(snapshot.score),
            cfg,
        }
    }

    /// Carry a high score over from an earlier game.
    pub fn with_high_score(mut self, high_score: Score) -> Self {
        self.high_score = self.high_score.max(high_score);
        self
    }

    #[inline]
    pub fn board(&self) -> Board { self.board }

    #[inline]
    pub fn score(&self) -> Score { self.score }

    #[inline]
    pub fn high_score(&self) -> Score { self.high_score }

    #[inline]
    pub fn config(&self) -> &GameConfig { &self.cfg }

    /// Directions that change the current board.
    #[inline]
    pub fn legal_moves(&self) -> LegalMoves { self.board.legal_moves() }

    #[inline]
    pub fn is_won(&self) -> bool { GameEngine::is_winner(self.board, self.cfg.target) }

    /// Play one turn: slide, check for the target, then maybe spawn a tile.
    ///
    /// ```
    /// use tty_2048::config::GameConfig;
    /// use tty_2048::engine::Move;
    /// use tty_2048::game::{Game, TurnOutcome};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let mut game = Game::new(GameConfig::default(), &mut rng);
    /// let dir = game.legal_moves().iter().next().unwrap();
    /// assert_eq!(game.play(dir, &mut rng), TurnOutcome::Continue);
    /// ```
    pub fn play<R: Rng + ?Sized>(&mut self, dir: Move, rng: &mut R) -> TurnOutcome {
        let out = self.board.shift(dir);
        tracing::debug!(%dir, gained = out.gained, changed = out.changed, "resolved move");
        if !out.changed {
            return TurnOutcome::Ignored;
        }
        self.board = out.board;
        self.score += out.gained;
        self.high_score = self.high_score.max(self.score);

        if self.is_won() {
            tracing::info!(score = self.score, target = self.cfg.target, "target reached");
            return TurnOutcome::Won;
        }

        // The slide just changed the board, so a move was possible this turn.
        match GameEngine::spawn_tile(self.board, true, &self.cfg, rng) {
            Spawn::Continue(board) => {
                self.board = board;
                if self.board.is_game_over() {
                    tracing::info!(score = self.score, "no legal move left");
                    TurnOutcome::Lost
                } else {
                    TurnOutcome::Continue
                }
            }
            Spawn::GameOver => {
                tracing::info!(score = self.score, "board locked");
                TurnOutcome::Lost
            }
        }
    }

    /// The value handed to persistence between turns.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { board: self.board, score: self.score, high_score: self.high_score }
    }

    /// What to persist once a turn that started from `before` ended with `outcome`.
    ///
    /// A won board is never written back: the pre-move board and score are
    /// kept, carrying the raised high score.
    pub fn snapshot_after(&self, before: Snapshot, outcome: TurnOutcome) -> Snapshot {
        match outcome {
            TurnOutcome::Won => Snapshot { high_score: self.high_score, ..before },
            _ => self.snapshot(),
        }
    }
}
