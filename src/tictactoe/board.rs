//! Board state representation and move application

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lines::LineAnalyzer;

/// A cell on the Tic-Tac-Toe board
///
/// Serializes to the wire representation used by the visualization frontend:
/// `null` for an empty cell, `"X"` or `"O"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::X => serializer.serialize_str("X"),
            Cell::O => serializer.serialize_str("O"),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        match value.as_deref() {
            None => Ok(Cell::Empty),
            Some("X") | Some("x") => Ok(Cell::X),
            Some("O") | Some("o") => Ok(Cell::O),
            Some(other) => Err(serde::de::Error::custom(format!(
                "invalid cell value '{other}' (expected null, \"X\", or \"O\")"
            ))),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Complete game state: board, whose turn it is, and terminal-state tracking
///
/// This type implements `Copy` since it is only a handful of bytes; search
/// simulation relies on cheap independent copies so the caller's live state
/// is never mutated.
///
/// Invariants maintained by [`apply_move`](Self::apply_move):
/// - `moves_made` equals the count of non-empty cells
/// - `is_over` is true iff `winner` is set or `moves_made == 9`
/// - `winner`, once set, is never cleared except by [`reset`](Self::reset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(rename = "board")]
    pub cells: [[Cell; 3]; 3],
    pub current_player: Player,
    pub winner: Option<Player>,
    #[serde(rename = "game_over")]
    pub is_over: bool,
    pub moves_made: u8,
}

impl GameState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        GameState {
            cells: [[Cell::Empty; 3]; 3],
            current_player: Player::X,
            winner: None,
            is_over: false,
            moves_made: 0,
        }
    }

    /// Restore the initial empty state
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    /// A fully independent copy for search simulation
    #[must_use = "snapshot returns a copy; the original is unchanged"]
    pub fn snapshot(&self) -> GameState {
        *self
    }

    /// Attempt to place the current player's mark at (row, col).
    ///
    /// Legal iff both coordinates are in 0..=2, the target cell is empty, and
    /// the game is not already over. On success the mover's lines are checked
    /// for a win (under legal play no other player's line can have completed),
    /// terminal flags are updated, and the turn flips. Returns `false` with no
    /// mutation on any illegal request; illegality is part of the protocol
    /// here, not a fault.
    pub fn apply_move(&mut self, row: usize, col: usize) -> bool {
        if row > 2 || col > 2 || self.is_over || self.cells[row][col] != Cell::Empty {
            return false;
        }

        self.cells[row][col] = self.current_player.to_cell();
        self.moves_made += 1;

        if LineAnalyzer::has_won(&self.cells, self.current_player) {
            self.winner = Some(self.current_player);
            self.is_over = true;
        } else if self.moves_made == 9 {
            self.is_over = true;
        }

        self.current_player = self.current_player.opponent();
        true
    }

    /// All empty cells in row-major order; empty iff the board is full
    pub fn available_moves(&self) -> Vec<(usize, usize)> {
        let mut moves = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                if self.cells[row][col] == Cell::Empty {
                    moves.push((row, col));
                }
            }
        }
        moves
    }

    /// Create a state from a 9-character board string in row-major order.
    ///
    /// Whitespace is filtered out; an optional `_X`/`_O` suffix sets the
    /// player to move explicitly, otherwise it is inferred from the piece
    /// counts (X-first semantics). Winner and terminal flags are derived
    /// from the parsed cells.
    ///
    /// # Errors
    ///
    /// Returns error if the board part has fewer than 9 cells, a character is
    /// not a valid cell, the piece counts are unreachable under legal play,
    /// both players hold winning lines, or a suffix conflicts with the counts.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, suffix) = match cleaned.find('_') {
            Some(idx) => (&cleaned[..idx], Some(&cleaned[idx + 1..])),
            None => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [[Cell::Empty; 3]; 3];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i / 3][i % 3] =
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })?;
        }

        let (x_count, o_count) = Self::count_pieces(&cells);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        }

        let current_player = match suffix {
            Some("X") => Player::X,
            Some("O") => Player::O,
            Some(other) => {
                return Err(crate::Error::InvalidPlayerString {
                    player: other.to_string(),
                    context: s.to_string(),
                });
            }
            None if x_count == o_count => Player::X,
            None => Player::O,
        };

        // A suffix can only contradict the counts in one direction: X ahead
        // by one means X just moved, so it must be O's turn.
        if x_count == o_count + 1 && current_player == Player::X {
            return Err(crate::Error::InvalidBoard {
                context: s.to_string(),
                reason: "X has an extra move, so it must be O's turn".to_string(),
            });
        }

        let x_wins = LineAnalyzer::has_won(&cells, Player::X);
        let o_wins = LineAnalyzer::has_won(&cells, Player::O);
        if x_wins && o_wins {
            return Err(crate::Error::InvalidBoard {
                context: s.to_string(),
                reason: "both players cannot have winning lines".to_string(),
            });
        }

        let winner = if x_wins {
            Some(Player::X)
        } else if o_wins {
            Some(Player::O)
        } else {
            None
        };
        let moves_made = (x_count + o_count) as u8;

        Ok(GameState {
            cells,
            current_player,
            winner,
            is_over: winner.is_some() || moves_made == 9,
            moves_made,
        })
    }

    /// Canonical string label, e.g. `"XO......._X"`
    pub fn encode(&self) -> String {
        let mut board = String::with_capacity(11);
        for row in &self.cells {
            for cell in row {
                board.push(cell.to_char());
            }
        }
        format!("{board}_{}", self.current_player)
    }

    fn count_pieces(cells: &[[Cell; 3]; 3]) -> (usize, usize) {
        let mut x_count = 0;
        let mut o_count = 0;
        for row in cells {
            for cell in row {
                match cell {
                    Cell::X => x_count += 1,
                    Cell::O => o_count += 1,
                    Cell::Empty => {}
                }
            }
        }
        (x_count, o_count)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
