use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const SIZE: usize = 4;
/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// One square of the board: empty, or holding a power-of-two tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(u32),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool { matches!(self, Cell::Empty) }

    /// The tile value, or `None` for an empty cell.
    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(v) => Some(v),
        }
    }
}

impl From<Option<u32>> for Cell {
    fn from(v: Option<u32>) -> Self { v.map_or(Cell::Empty, Cell::Occupied) }
}

/// A 4x4 2048 board addressed by `(column, row)`, both in `0..4`.
///
/// `Board` is `Copy` and every operation returns a new value, so
/// speculative moves never disturb the board they were computed from.
/// Row 0 is the top row; column 0 is the leftmost column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    // Indexed [row][column].
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// A constant empty board.
    pub const EMPTY: Board = Board { cells: [[Cell::Empty; SIZE]; SIZE] };

    /// Build a board from rows of optional values, top row first.
    ///
    /// ```
    /// use tty_2048::engine::{Board, Cell};
    /// let b = Board::from_rows([
    ///     [Some(2), None, None, None],
    ///     [None; 4],
    ///     [None; 4],
    ///     [None, None, None, Some(4)],
    /// ]);
    /// assert_eq!(b.get(0, 0), Cell::Occupied(2));
    /// assert_eq!(b.get(3, 3), Cell::Occupied(4));
    /// ```
    pub fn from_rows(rows: [[Option<u32>; SIZE]; SIZE]) -> Self {
        let mut board = Board::EMPTY;
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y][x] = Cell::from(v);
            }
        }
        board
    }

    /// Build a board from 16 cells in row-major order.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        let mut board = Board::EMPTY;
        for (idx, cell) in cells.into_iter().enumerate() {
            board.cells[idx / SIZE][idx % SIZE] = cell;
        }
        board
    }

    /// The 16 cells in row-major order (top row first, left to right).
    pub fn to_cells(self) -> [Cell; CELLS] {
        let mut out = [Cell::Empty; CELLS];
        for (idx, slot) in out.iter_mut().enumerate() {
            *slot = self.cells[idx / SIZE][idx % SIZE];
        }
        out
    }

    #[inline]
    pub fn get(self, column: usize, row: usize) -> Cell { self.cells[row][column] }

    /// Return a copy of this board with `(column, row)` set to `cell`.
    #[inline]
    pub fn with_cell(mut self, column: usize, row: usize, cell: Cell) -> Self {
        self.cells[row][column] = cell;
        self
    }

    /// Coordinates of every empty cell, in row-major order.
    pub fn empty_cells(self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(CELLS);
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.cells[y][x].is_empty() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_empty()).count()
    }

    /// Count the number of occupied cells on the board.
    #[inline]
    pub fn count_occupied(self) -> usize { CELLS - self.count_empty() }

    /// Return the highest tile value present, or 0 on an empty board.
    pub fn highest_tile(self) -> u32 {
        self.cells.iter().flatten().filter_map(|c| c.value()).max().unwrap_or(0)
    }

    /// True if every occupied cell holds a power of two no smaller than 2.
    pub fn is_well_formed(self) -> bool {
        self.cells
            .iter()
            .flatten()
            .filter_map(|c| c.value())
            .all(|v| v >= 2 && v.is_power_of_two())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Board[")?;
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 { f.write_str(" / ")?; }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 { f.write_str(",")?; }
                match cell.value() {
                    Some(v) => write!(f, "{v}")?,
                    None => f.write_str("_")?,
                }
            }
        }
        f.write_str("]")
    }
}

const RULE: &str = "  |________|________|________|________|";
const GAP: &str = "  |        |        |        |        |";

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "   ___________________________________")?;
        for row in &self.cells {
            writeln!(f, "{GAP}")?;
            write!(f, "  |")?;
            for cell in row {
                let text = cell.value().map(|v| v.to_string()).unwrap_or_default();
                write!(f, " {text:^6} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{RULE}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_rows([
            [Some(2), None, Some(4), None],
            [None, None, None, None],
            [Some(2048), None, None, None],
            [None, None, None, Some(8)],
        ])
    }

    #[test]
    fn it_count_empty() {
        assert_eq!(Board::EMPTY.count_empty(), 16);
        assert_eq!(sample().count_empty(), 12);
        assert_eq!(sample().count_occupied(), 4);
    }

    #[test]
    fn cells_round_trip_row_major() {
        let b = sample();
        let cells = b.to_cells();
        assert_eq!(cells[2], Cell::Occupied(4));
        assert_eq!(cells[8], Cell::Occupied(2048));
        assert_eq!(cells[15], Cell::Occupied(8));
        assert_eq!(Board::from_cells(cells), b);
    }

    #[test]
    fn coordinates_are_column_then_row() {
        let b = sample();
        assert_eq!(b.get(2, 0), Cell::Occupied(4));
        assert_eq!(b.get(0, 2), Cell::Occupied(2048));
        assert!(b.get(1, 1).is_empty());
        let b2 = b.with_cell(1, 1, Cell::Occupied(16));
        assert_eq!(b2.get(1, 1), Cell::Occupied(16));
        assert!(b.get(1, 1).is_empty());
    }

    #[test]
    fn empty_cells_are_row_major() {
        let b = Board::from_rows([
            [Some(2), Some(2), Some(2), Some(2)],
            [Some(2), None, Some(2), Some(2)],
            [Some(2), Some(2), Some(2), Some(2)],
            [None, Some(2), Some(2), Some(2)],
        ]);
        assert_eq!(b.empty_cells(), vec![(1, 1), (0, 3)]);
    }

    #[test]
    fn it_highest_tile() {
        assert_eq!(Board::EMPTY.highest_tile(), 0);
        assert_eq!(sample().highest_tile(), 2048);
    }

    #[test]
    fn well_formed_rejects_odd_values() {
        assert!(sample().is_well_formed());
        assert!(!Board::EMPTY.with_cell(0, 0, Cell::Occupied(3)).is_well_formed());
        assert!(!Board::EMPTY.with_cell(0, 0, Cell::Occupied(1)).is_well_formed());
    }

    #[test]
    fn display_centres_values() {
        let text = sample().to_string();
        assert!(text.contains("|   2    |        |   4    |        |"));
        assert!(text.contains("|  2048  |"));
        assert_eq!(text.lines().filter(|l| *l == RULE).count(), 4);
    }
}
