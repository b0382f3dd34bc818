//! Game parameters passed into the engine instead of module-level constants.

use crate::engine::CELLS;

/// Largest target whose tile still fits a 4-wide save field.
pub const MAX_TARGET: u32 = 8192;

/// Configurable knobs for a game. Defaults preserve the classic rules.
///
/// - `target`: tile value that wins the game.
/// - `initial_tiles`: occupied cells on a freshly dealt board.
/// - `max_exponent`: new tiles are `2^k` with `k` uniform in `1..=max_exponent`.
/// - `spawn_chance`: probability that a tile is placed after a move.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub target: u32,
    pub initial_tiles: usize,
    pub max_exponent: u32,
    pub spawn_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { target: 2048, initial_tiles: 6, max_exponent: 1, spawn_chance: 0.5 }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("target {0} must be a power of two between 4 and 8192")]
    Target(u32),
    #[error("initial tiles must number 1 to 16, got {0}")]
    InitialTiles(usize),
    #[error("max exponent {exponent} must be at least 1 and spawn tiles below the target {target}")]
    MaxExponent { exponent: u32, target: u32 },
    #[error("spawn chance {0} must lie within [0, 1]")]
    SpawnChance(f64),
}

impl GameConfig {
    /// Check that the parameters describe a playable game.
    ///
    /// ```
    /// use tty_2048::config::GameConfig;
    /// assert!(GameConfig::default().validate().is_ok());
    /// let bad = GameConfig { target: 1000, ..GameConfig::default() };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target < 4 || self.target > MAX_TARGET || !self.target.is_power_of_two() {
            return Err(ConfigError::Target(self.target));
        }
        if !(1..=CELLS).contains(&self.initial_tiles) {
            return Err(ConfigError::InitialTiles(self.initial_tiles));
        }
        let spawn_too_big = self
            .largest_spawn()
            .map_or(true, |largest| largest >= self.target);
        if self.max_exponent == 0 || spawn_too_big {
            return Err(ConfigError::MaxExponent { exponent: self.max_exponent, target: self.target });
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::SpawnChance(self.spawn_chance));
        }
        Ok(())
    }

    /// Largest value a spawned tile can take, `None` if it overflows.
    #[inline]
    pub fn largest_spawn(&self) -> Option<u32> { 2u32.checked_pow(self.max_exponent) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_target() {
        for target in [0, 2, 3, 100, 2047, 16384, 1 << 31] {
            let cfg = GameConfig { target, ..GameConfig::default() };
            assert_eq!(cfg.validate(), Err(ConfigError::Target(target)));
        }
        let cfg = GameConfig { target: 4, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
        let cfg = GameConfig { target: MAX_TARGET, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn largest_target_tile_fits_save_field() {
        use crate::engine::{Board, Cell};
        use crate::save::{encode_snapshot, Snapshot};
        let board = Board::EMPTY.with_cell(0, 0, Cell::Occupied(MAX_TARGET));
        assert!(encode_snapshot(&Snapshot { board, score: 0, high_score: 0 }).is_ok());
        let board = Board::EMPTY.with_cell(0, 0, Cell::Occupied(MAX_TARGET * 2));
        assert!(encode_snapshot(&Snapshot { board, score: 0, high_score: 0 }).is_err());
    }

    #[test]
    fn rejects_bad_initial_tiles() {
        let cfg = GameConfig { initial_tiles: 17, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::InitialTiles(17)));
        let cfg = GameConfig { initial_tiles: 0, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::InitialTiles(0)));
        let cfg = GameConfig { initial_tiles: 1, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
        let cfg = GameConfig { initial_tiles: 16, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_spawns_reaching_target() {
        let cfg = GameConfig { max_exponent: 0, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::MaxExponent { .. })));
        let cfg = GameConfig { max_exponent: 11, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::MaxExponent { .. })));
        let cfg = GameConfig { max_exponent: 40, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::MaxExponent { .. })));
        let cfg = GameConfig { max_exponent: 2, ..GameConfig::default() };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_spawn_chance() {
        for chance in [-0.1, 1.5, f64::NAN] {
            let cfg = GameConfig { spawn_chance: chance, ..GameConfig::default() };
            assert!(matches!(cfg.validate(), Err(ConfigError::SpawnChance(_))));
        }
    }
}
