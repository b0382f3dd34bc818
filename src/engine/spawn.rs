use rand::seq::index;
use rand::Rng;

use super::state::{Board, Cell, CELLS};
use crate::config::GameConfig;

/// What the spawner did with a post-move board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    /// Play continues on this board (a tile may or may not have been added).
    Continue(Board),
    /// The board is full and nothing can move.
    GameOver,
}

/// Draw a new tile value: `2^k` with `k` uniform in `1..=max_exponent`.
#[inline]
fn generate_random_tile<R: Rng + ?Sized>(cfg: &GameConfig, rng: &mut R) -> u32 {
    1 << rng.gen_range(1..=cfg.max_exponent)
}

/// Deal a fresh board: `initial_tiles` distinct cells, each holding a random tile.
///
/// ```
/// use tty_2048::config::GameConfig;
/// use tty_2048::engine::new_board;
/// use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(42);
/// let b = new_board(&GameConfig::default(), &mut rng);
/// assert_eq!(b.count_occupied(), 6);
/// ```
pub fn new_board<R: Rng + ?Sized>(cfg: &GameConfig, rng: &mut R) -> Board {
    let amount = cfg.initial_tiles.min(CELLS);
    let mut cells = [Cell::Empty; CELLS];
    for idx in index::sample(rng, CELLS, amount).into_iter() {
        cells[idx] = Cell::Occupied(generate_random_tile(cfg, rng));
    }
    Board::from_cells(cells)
}

/// Possibly place one new tile after a move.
///
/// With no empty cell the board is returned as is when `move_possible`,
/// otherwise the game is over. With empty cells, one is picked uniformly
/// and filled with probability `spawn_chance`.
///
/// ```
/// use tty_2048::config::GameConfig;
/// use tty_2048::engine::{spawn_tile, Board, Spawn};
/// use rand::{rngs::StdRng, SeedableRng};
/// let cfg = GameConfig { spawn_chance: 1.0, ..GameConfig::default() };
/// let mut rng = StdRng::seed_from_u64(3);
/// match spawn_tile(Board::EMPTY, true, &cfg, &mut rng) {
///     Spawn::Continue(b) => assert_eq!(b.count_occupied(), 1),
///     Spawn::GameOver => unreachable!(),
/// }
/// ```
pub fn spawn_tile<R: Rng + ?Sized>(board: Board, move_possible: bool, cfg: &GameConfig, rng: &mut R) -> Spawn {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return if move_possible {
            Spawn::Continue(board)
        } else {
            tracing::trace!("no empty cell and no legal move");
            Spawn::GameOver
        };
    }
    let (x, y) = empty[rng.gen_range(0..empty.len())];
    if rng.gen_bool(cfg.spawn_chance) {
        let value = generate_random_tile(cfg, rng);
        tracing::trace!(column = x, row = y, value, "spawned tile");
        Spawn::Continue(board.with_cell(x, y, Cell::Occupied(value)))
    } else {
        tracing::trace!("skipped spawn this turn");
        Spawn::Continue(board)
    }
}
