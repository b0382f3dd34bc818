//! Fixed-width text snapshots of a game.
//!
//! Layout: 16 cells of width 4 in row-major order, an empty cell being four
//! spaces and an occupied cell its right-aligned value. Optionally followed
//! by a 6-wide score and a 6-wide high score.

use std::fs;
use std::io;
use std::path::Path;

use crate::engine::{Board, Cell, Score, CELLS};

/// Default file name, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "2048.values";

const CELL_WIDTH: usize = 4;
const SCORE_WIDTH: usize = 6;
const BOARD_LEN: usize = CELLS * CELL_WIDTH;

/// Board and scores as persisted between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub board: Board,
    pub score: Score,
    pub high_score: Score,
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("save data is {0} bytes long, expected at least 64")]
    Truncated(usize),
    #[error("unexpected {0} bytes after the board")]
    TrailingData(usize),
    #[error("cell {index} holds {text:?}, not a number")]
    InvalidCell { index: usize, text: String },
    #[error("cell {index} holds {value}, not a power of two between 2 and {target}")]
    OutOfRange { index: usize, value: u32, target: u32 },
    #[error("{field} field holds {text:?}, not a number")]
    InvalidScore { field: &'static str, text: String },
    #[error("{value} does not fit a {width}-wide field")]
    TooWide { value: u64, width: usize },
}

impl SaveError {
    /// True when the save file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SaveError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Encode a snapshot, scores included.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, SaveError> {
    let mut out = String::with_capacity(BOARD_LEN + 2 * SCORE_WIDTH);
    for cell in snapshot.board.to_cells() {
        match cell {
            Cell::Empty => out.push_str("    "),
            Cell::Occupied(v) => push_field(&mut out, u64::from(v), CELL_WIDTH)?,
        }
    }
    push_field(&mut out, snapshot.score, SCORE_WIDTH)?;
    push_field(&mut out, snapshot.high_score, SCORE_WIDTH)?;
    Ok(out)
}

fn push_field(out: &mut String, value: u64, width: usize) -> Result<(), SaveError> {
    let text = format!("{value:>width$}");
    if text.len() > width {
        return Err(SaveError::TooWide { value, width });
    }
    out.push_str(&text);
    Ok(())
}

/// Decode a snapshot, rejecting any cell that is not a power of two in `2..=target`.
///
/// ```
/// use tty_2048::save::{decode_snapshot, encode_snapshot, Snapshot};
/// use tty_2048::engine::{Board, Cell};
/// let snap = Snapshot {
///     board: Board::EMPTY.with_cell(3, 1, Cell::Occupied(64)),
///     score: 120,
///     high_score: 4096,
/// };
/// let text = encode_snapshot(&snap).unwrap();
/// assert_eq!(decode_snapshot(&text, 2048).unwrap(), snap);
/// ```
pub fn decode_snapshot(text: &str, target: u32) -> Result<Snapshot, SaveError> {
    let text = text.trim_end_matches(&['\r', '\n'][..]);
    if text.len() < BOARD_LEN {
        return Err(SaveError::Truncated(text.len()));
    }
    let mut cells = [Cell::Empty; CELLS];
    for (index, slot) in cells.iter_mut().enumerate() {
        let start = index * CELL_WIDTH;
        let field = field_at(text, start, CELL_WIDTH);
        *slot = parse_cell(index, field, target)?;
    }

    let rest = text.get(BOARD_LEN..).unwrap_or_default();
    let (score, high_score) = match rest.len() {
        0 => (0, 0),
        SCORE_WIDTH => (parse_score("score", rest)?, 0),
        n if n == 2 * SCORE_WIDTH => (
            parse_score("score", field_at(rest, 0, SCORE_WIDTH))?,
            parse_score("high score", field_at(rest, SCORE_WIDTH, SCORE_WIDTH))?,
        ),
        n => return Err(SaveError::TrailingData(n)),
    };
    Ok(Snapshot { board: Board::from_cells(cells), score, high_score })
}

// A field that splits a multi-byte char reads as `?` and fails to parse.
fn field_at(text: &str, start: usize, width: usize) -> &str {
    text.get(start..start + width).unwrap_or("?")
}

fn parse_cell(index: usize, field: &str, target: u32) -> Result<Cell, SaveError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(Cell::Empty);
    }
    let value: u32 = trimmed
        .parse()
        .map_err(|_| SaveError::InvalidCell { index, text: field.to_string() })?;
    if value < 2 || !value.is_power_of_two() || value > target {
        return Err(SaveError::OutOfRange { index, value, target });
    }
    Ok(Cell::Occupied(value))
}

fn parse_score(field: &'static str, text: &str) -> Result<Score, SaveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| SaveError::InvalidScore { field, text: text.to_string() })
}

/// Write a snapshot to a file, replacing its contents.
pub fn save_to_path<P: AsRef<Path>>(path: P, snapshot: &Snapshot) -> Result<(), SaveError> {
    let text = encode_snapshot(snapshot)?;
    fs::write(path.as_ref(), text)?;
    tracing::debug!(path = %path.as_ref().display(), score = snapshot.score, "saved snapshot");
    Ok(())
}

/// Read a snapshot from a file.
pub fn load_from_path<P: AsRef<Path>>(path: P, target: u32) -> Result<Snapshot, SaveError> {
    let text = fs::read_to_string(path.as_ref())?;
    let snapshot = decode_snapshot(&text, target)?;
    tracing::info!(path = %path.as_ref().display(), score = snapshot.score, "loaded snapshot");
    Ok(snapshot)
}
