//! Terminal plumbing: parsing typed commands and drawing the game.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};

use crate::engine::{LegalMoves, Move};
use crate::game::Game;

pub const BANNER: &str = "Slide numbered tiles on a grid to combine them to create a tile with the number";
pub const MOVE_PROMPT: &str = "Please choose your direction : (W) Up, (S) Down, (A) Left, (D) Right or (Q)uit.";

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Slide(Move),
    Quit,
}

/// Parse a typed line by its first non-blank character, ignoring case.
///
/// ```
/// use tty_2048::console::{parse_command, Command};
/// use tty_2048::engine::Move;
/// assert_eq!(parse_command(" w"), Some(Command::Slide(Move::Up)));
/// assert_eq!(parse_command("quit"), Some(Command::Quit));
/// assert_eq!(parse_command("x"), None);
/// ```
pub fn parse_command(line: &str) -> Option<Command> {
    let first = line.trim().chars().next()?.to_ascii_uppercase();
    match first {
        'W' => Some(Command::Slide(Move::Up)),
        'S' => Some(Command::Slide(Move::Down)),
        'A' => Some(Command::Slide(Move::Left)),
        'D' => Some(Command::Slide(Move::Right)),
        'Q' => Some(Command::Quit),
        _ => None,
    }
}

/// Parse a yes/no answer by its first non-blank character.
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().chars().next()?.to_ascii_uppercase() {
        'Y' => Some(true),
        'N' => Some(false),
        _ => None,
    }
}

/// Hint line listing the playable directions.
pub fn hint_line(legal: &LegalMoves) -> String {
    format!("Possible directions : {legal}")
}

/// Draw the board, the scores and the hints, clearing the screen first when asked.
pub fn draw<W: Write>(out: &mut W, game: &Game, legal: &LegalMoves, clear: bool) -> io::Result<()> {
    if clear {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    writeln!(out, "{BANNER} {}", game.config().target)?;
    write!(out, "{}", game.board())?;
    writeln!(out)?;
    writeln!(out, "Score: {:>6}   High score: {:>6}", game.score(), game.high_score())?;
    if legal.any() {
        writeln!(out, "{}", hint_line(legal))?;
        writeln!(out)?;
    }
    out.flush()
}

/// Print a status line.
pub fn say<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{message}")?;
    out.flush()
}

/// Clear the whole screen.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::{Board, Cell};
    use crate::save::Snapshot;

    #[test]
    fn parses_move_keys() {
        assert_eq!(parse_command("W"), Some(Command::Slide(Move::Up)));
        assert_eq!(parse_command("s\n"), Some(Command::Slide(Move::Down)));
        assert_eq!(parse_command("  a"), Some(Command::Slide(Move::Left)));
        assert_eq!(parse_command("d"), Some(Command::Slide(Move::Right)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("up"), None);
    }

    #[test]
    fn parses_yes_no() {
        assert_eq!(parse_yes_no("yes"), Some(true));
        assert_eq!(parse_yes_no(" n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn draw_shows_scores_and_hints() {
        let board = Board::EMPTY.with_cell(0, 0, Cell::Occupied(2));
        let game = Game::from_snapshot(Snapshot { board, score: 12, high_score: 40 }, GameConfig::default());
        let legal = game.legal_moves();
        let mut buf = Vec::new();
        draw(&mut buf, &game, &legal, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("the number 2048"));
        assert!(text.contains("Score:     12   High score:     40"));
        assert!(text.contains("Possible directions : Down, Right"));
    }
}
