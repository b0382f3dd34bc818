use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::engine::{Board, Move, Score};

const MAX_MERGEABLE: u32 = u32::MAX / 2;

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordFinish {
    Won,
    Lost,
    Quit,
}

/// A single decision step in a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordStep {
    /// Board before the move.
    pub pre_board: Board,
    /// Chosen direction.
    pub chosen: Move,
    /// Points earned by merges on this move.
    pub gained: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordMeta {
    pub target: u32,
    pub start_unix_s: u64,
    pub final_score: Score,
    pub highest_tile: u32,
    pub finish: RecordFinish,
}

/// A full game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub meta: RecordMeta,
    pub steps: Vec<RecordStep>,
    pub final_board: Board,
}

impl GameRecord {
    /// Sum of the points earned over all steps.
    pub fn total_gained(&self) -> Score { self.steps.iter().map(|s| s.gained).sum() }

    /// True if every step's direction actually moved its pre-move board and
    /// earned the recorded points. Boards holding values a merge could not
    /// double are rejected without replaying them.
    pub fn is_consistent(&self) -> bool {
        self.steps.iter().all(|s| {
            if !s.pre_board.is_well_formed() || s.pre_board.highest_tile() > MAX_MERGEABLE {
                return false;
            }
            let out = s.pre_board.shift(s.chosen);
            out.changed && out.gained == s.gained
        })
    }
}

/// Collects steps while a game is played.
#[derive(Debug, Clone)]
pub struct Recorder {
    target: u32,
    start_unix_s: u64,
    steps: Vec<RecordStep>,
}

impl Recorder {
    pub fn new(target: u32) -> Self {
        Self { target, start_unix_s: now_unix_seconds(), steps: Vec::with_capacity(1024) }
    }

    pub fn record(&mut self, pre_board: Board, chosen: Move, gained: Score) {
        self.steps.push(RecordStep { pre_board, chosen, gained });
    }

    #[inline]
    pub fn len(&self) -> usize { self.steps.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Close the record with the final board and score.
    pub fn finish(self, final_board: Board, final_score: Score, finish: RecordFinish) -> GameRecord {
        let highest_tile = self
            .steps
            .iter()
            .map(|s| s.pre_board.highest_tile())
            .chain(std::iter::once(final_board.highest_tile()))
            .max()
            .unwrap_or(0);
        let meta = RecordMeta {
            target: self.target,
            start_unix_s: self.start_unix_s,
            final_score,
            highest_tile,
            finish,
        };
        GameRecord { meta, steps: self.steps, final_board }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SerializationError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("postcard serialize error: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Encode a record to postcard bytes.
pub fn to_postcard_bytes(record: &GameRecord) -> Result<Vec<u8>, SerializationError> {
    Ok(postcard::to_allocvec(record)?)
}

/// Decode a record from postcard bytes.
pub fn from_postcard_bytes(bytes: &[u8]) -> Result<GameRecord, SerializationError> {
    Ok(postcard::from_bytes(bytes)?)
}

/// Write a postcard-encoded record to a file.
pub fn write_postcard_to_path<P: AsRef<Path>>(path: P, record: &GameRecord) -> Result<(), SerializationError> {
    let bytes = to_postcard_bytes(record)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a postcard-encoded record from a file.
pub fn read_postcard_from_path<P: AsRef<Path>>(path: P) -> Result<GameRecord, SerializationError> {
    let bytes = fs::read(path)?;
    from_postcard_bytes(&bytes)
}

pub fn now_unix_seconds() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cell;
    use tempfile::NamedTempFile;

    fn make_test_record() -> GameRecord {
        let b0 = Board::from_rows([[Some(2), Some(2), None, None], [None; 4], [None; 4], [None; 4]]);
        let b1 = b0.shift(Move::Left).board.with_cell(3, 3, Cell::Occupied(2));
        let final_board = b1.shift(Move::Up).board;
        let mut rec = Recorder::new(2048);
        rec.record(b0, Move::Left, 2);
        rec.record(b1, Move::Up, 0);
        rec.finish(final_board, 2, RecordFinish::Quit)
    }

    #[test]
    fn test_move_serialization() {
        let up = Move::Up;
        let bytes = postcard::to_allocvec(&up).unwrap();
        let loaded: Move = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(up, loaded);
    }

    #[test]
    fn test_board_serialization() {
        let b = Board::EMPTY.with_cell(1, 2, Cell::Occupied(1024));
        let bytes = postcard::to_allocvec(&b).unwrap();
        let loaded: Board = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(b, loaded);
    }

    #[test]
    fn recorder_fills_meta() {
        let record = make_test_record();
        assert_eq!(record.steps.len(), 2);
        assert_eq!(record.meta.final_score, 2);
        assert_eq!(record.meta.highest_tile, 4);
        assert_eq!(record.meta.finish, RecordFinish::Quit);
        assert_eq!(record.total_gained(), 2);
        assert!(record.is_consistent());
    }

    #[test]
    fn inconsistent_step_is_detected() {
        let mut record = make_test_record();
        record.steps[0].gained = 99;
        assert!(!record.is_consistent());
    }

    #[test]
    fn oversized_tiles_are_inconsistent() {
        let mut record = make_test_record();
        record.steps[0].pre_board = Board::EMPTY
            .with_cell(0, 0, Cell::Occupied(1 << 31))
            .with_cell(1, 0, Cell::Occupied(1 << 31));
        assert!(!record.is_consistent());

        let mut record = make_test_record();
        record.steps[1].pre_board = record.steps[1].pre_board.with_cell(2, 2, Cell::Occupied(6));
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_file_io() {
        let record = make_test_record();
        let tmp = NamedTempFile::new().unwrap();
        write_postcard_to_path(tmp.path(), &record).unwrap();
        let loaded = read_postcard_from_path(tmp.path()).unwrap();
        assert_eq!(record, loaded);
    }

    #[test]
    fn test_garbage_bytes_error() {
        let err = from_postcard_bytes(&[0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, SerializationError::Postcard(_)));
    }
}
