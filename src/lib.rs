//! tty-2048: a 2048 move-resolution engine and the pieces around it
//!
//! This crate provides:
//! - A `Board` value type with pure operations (`shift`, `legal_moves`, `has_tile`, ...)
//! - A spawner with injected randomness (`engine::spawn_tile`, `engine::new_board`)
//! - An explicit `GameConfig` instead of global constants (`config` module)
//! - A turn driver (`game::Game`) sequencing move, win check and spawn
//! - The fixed-width text save format (`save` module)
//! - A postcard game record for replays (`serialization` module)
//!
//! Quick start:
//! ```
//! use tty_2048::config::GameConfig;
//! use tty_2048::engine::{self as GameEngine, Spawn};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let cfg = GameConfig::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = GameEngine::new_board(&cfg, &mut rng);
//!
//! let (any, legal) = GameEngine::legal_directions(b0);
//! assert!(any);
//! let dir = legal.iter().next().unwrap();
//! let (b1, _score) = GameEngine::resolve_move(b0, dir, 0);
//! assert!(!GameEngine::is_winner(b1, cfg.target));
//! match GameEngine::spawn_tile(b1, b1.legal_moves().any(), &cfg, &mut rng) {
//!     Spawn::Continue(b2) => assert!(b2.count_occupied() <= b1.count_occupied() + 1),
//!     Spawn::GameOver => unreachable!(),
//! }
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use tty_2048::config::GameConfig;
//! use tty_2048::game::{Game, TurnOutcome};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut game = Game::new(GameConfig::default(), &mut rng);
//! let mut moves = 0u32;
//! while moves < 8 {
//!     let Some(dir) = game.legal_moves().iter().next() else { break };
//!     match game.play(dir, &mut rng) {
//!         TurnOutcome::Won | TurnOutcome::Lost => break,
//!         _ => moves += 1,
//!     }
//! }
//! assert!(moves > 0);
//! ```
//!
pub mod config;
pub mod console;
pub mod engine;
pub mod game;
pub mod save;
pub mod serialization;
