//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules;

/// A cell on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    /// The human's mark, rendered as `X`
    Human,
    /// The computer's mark, rendered as `O`
    Computer,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Computer => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '*' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Human),
            'O' | 'o' | '0' => Some(Cell::Computer),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Computer => Cell::Computer,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => f.write_str("Human"),
            Player::Computer => f.write_str("Computer"),
        }
    }
}

/// A 3x3 grid of cells addressed by a flattened index 0-8
/// (`row = i / 3`, `col = i % 3`).
///
/// This type implements `Copy` since it is only 9 bytes; the search clones
/// boards freely when exploring hypothetical futures. The board carries no
/// side-to-move: in the limited-memory variant eviction breaks piece-count
/// parity, so the turn cannot be inferred from the grid and is tracked by
/// the session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string must contain exactly 9 cell characters; whitespace is
    /// filtered out. `.`, `*` and space all read as empty so boards from
    /// either notation parse.
    ///
    /// # Errors
    ///
    /// Returns error if anything other than 9 non-whitespace characters
    /// remain or any character is not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in index order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place a player's mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] for positions past 8 and
    /// [`crate::Error::IllegalMove`] for occupied cells; the board is left
    /// untouched in both cases.
    pub fn place(&mut self, pos: usize, player: Player) -> Result<(), crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::OutOfBounds { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::IllegalMove { position: pos });
        }
        self.cells[pos] = player.to_cell();
        Ok(())
    }

    /// Raw cell write for callers that have already validated the move
    pub(crate) fn set(&mut self, pos: usize, cell: Cell) {
        self.cells[pos] = cell;
    }

    /// Reset a cell to empty (move undo and ledger eviction)
    pub(crate) fn clear(&mut self, pos: usize) {
        self.cells[pos] = Cell::Empty;
    }

    /// Access the raw cells, for the terminal-state queries in [`rules`]
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        rules::winner(&self.cells)
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.cells)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        rules::is_terminal(&self.cells)
    }

    /// Get a compact string representation for use as a key
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1) % 3 == 0 && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
