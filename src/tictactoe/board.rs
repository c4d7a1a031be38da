//! Board representation and terminal classification

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Signed mark used by line sums and the structural hash.
    pub fn value(self) -> i32 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => -1,
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

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Square board of arbitrary dimension, cells stored row-major.
///
/// Equality and hashing cover the full cell sequence, so a `Board` is safe to
/// use as a lookup key. [`Board::structural_hash`] is a separate, lossy digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    dim: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `dim` x `dim` board.
    pub fn empty(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidDimension);
        }
        Ok(Self {
            dim,
            cells: vec![Cell::Empty; dim * dim],
        })
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rowcol_to_pos(&self, row: usize, col: usize) -> usize {
        row * self.dim + col
    }

    pub fn pos_to_rowcol(&self, pos: usize) -> (usize, usize) {
        (pos / self.dim, pos % self.dim)
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.dim || col >= self.dim {
            return Err(Error::CellOutOfBounds {
                row,
                col,
                dim: self.dim,
            });
        }
        Ok(())
    }

    /// Cell at `(row, col)`. Panics when out of bounds; use [`Board::get`] for
    /// untrusted coordinates.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.rowcol_to_pos(row, col)]
    }

    pub fn cell_at(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.check_bounds(row, col)?;
        Ok(self.cell(row, col))
    }

    /// Return a copy of the board with `player` placed at `(row, col)`.
    pub fn with_move(&self, row: usize, col: usize, player: Player) -> Result<Board> {
        self.check_bounds(row, col)?;
        let pos = self.rowcol_to_pos(row, col);
        if self.cells[pos] != Cell::Empty {
            return Err(Error::OccupiedCell { row, col });
        }
        let mut next = self.clone();
        next.cells[pos] = player.to_cell();
        Ok(next)
    }

    /// Empty cells in row-major scan order.
    pub fn empty_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(pos, _)| self.pos_to_rowcol(pos))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Player to move, assuming X opened the game.
    pub fn mover(&self) -> Player {
        let x = self.cells.iter().filter(|c| **c == Cell::X).count();
        let o = self.cells.iter().filter(|c| **c == Cell::O).count();
        if x == o { Player::X } else { Player::O }
    }

    /// Classify the board: `Some(outcome)` when the game is over, `None` otherwise.
    ///
    /// Every row, column and both diagonals are summed using the signed cell
    /// marks; a sum of `dim` is a run of X, `-dim` a run of O. A full board
    /// without a run is a draw.
    pub fn check_done_win(&self) -> Option<GameOutcome> {
        let dim = self.dim;
        let target = dim as i32;
        let mut scores = Vec::with_capacity(2 * dim + 2);

        for r in 0..dim {
            let mut row_score = 0;
            let mut col_score = 0;
            for c in 0..dim {
                row_score += self.cell(r, c).value();
                col_score += self.cell(c, r).value();
            }
            scores.push(row_score);
            scores.push(col_score);
        }

        let mut diag = 0;
        let mut anti_diag = 0;
        for r in 0..dim {
            diag += self.cell(r, r).value();
            anti_diag += self.cell(r, dim - 1 - r).value();
        }
        scores.push(diag);
        scores.push(anti_diag);

        for score in scores {
            if score == target {
                return Some(GameOutcome::Win(Player::X));
            }
            if score == -target {
                return Some(GameOutcome::Win(Player::O));
            }
        }

        if self.occupied_count() == self.size() {
            return Some(GameOutcome::Draw);
        }
        None
    }

    /// Hash-combine digest of the cell marks.
    ///
    /// Deterministic, but distinct boards may collide; it is never used as an
    /// identity key.
    pub fn structural_hash(&self) -> u32 {
        self.cells.iter().fold(0u32, |seed, cell| {
            seed ^ (cell.value() as u32)
                .wrapping_add(0x9e37_79b9)
                .wrapping_add(seed << 6)
                .wrapping_add(seed >> 2)
        })
    }

    /// Compact row-major encoding, e.g. `"X.O......"`.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(4 * self.dim + 1);
        for r in 0..self.dim {
            writeln!(f, "{rule}")?;
            write!(f, "|")?;
            for c in 0..self.dim {
                let mark = match self.cell(r, c) {
                    Cell::Empty => ' ',
                    other => other.to_char(),
                };
                write!(f, " {mark} |")?;
            }
            writeln!(f)?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(dim: usize, marks: &str) -> Board {
        let mut board = Board::empty(dim).unwrap();
        for (pos, ch) in marks.chars().enumerate() {
            let (r, c) = board.pos_to_rowcol(pos);
            board = match ch {
                'X' => board.with_move(r, c, Player::X).unwrap(),
                'O' => board.with_move(r, c, Player::O).unwrap(),
                _ => board,
            };
        }
        board
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(Board::empty(0), Err(Error::InvalidDimension)));
    }

    #[test]
    fn test_with_move_rejects_occupied_and_out_of_bounds() {
        let board = Board::empty(3).unwrap().with_move(1, 1, Player::X).unwrap();
        assert!(matches!(
            board.with_move(1, 1, Player::O),
            Err(Error::OccupiedCell { row: 1, col: 1 })
        ));
        assert!(matches!(
            board.with_move(3, 0, Player::O),
            Err(Error::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_check_done_win_rows_columns_diagonals() {
        assert_eq!(
            board_from(3, "XXXOO....").check_done_win(),
            Some(GameOutcome::Win(Player::X))
        );
        assert_eq!(
            board_from(3, "OXXOX.O..").check_done_win(),
            Some(GameOutcome::Win(Player::O))
        );
        assert_eq!(
            board_from(3, "XOOOX...X").check_done_win(),
            Some(GameOutcome::Win(Player::X))
        );
        assert_eq!(
            board_from(3, "XXO.O.O.X").check_done_win(),
            Some(GameOutcome::Win(Player::O))
        );
    }

    #[test]
    fn test_check_done_win_draw_and_in_progress() {
        assert_eq!(
            board_from(3, "XOXXOOOXX").check_done_win(),
            Some(GameOutcome::Draw)
        );
        assert_eq!(board_from(3, "XO.......").check_done_win(), None);
        assert_eq!(Board::empty(3).unwrap().check_done_win(), None);
    }

    #[test]
    fn test_structural_hash_is_deterministic() {
        let a = board_from(3, "X...O...X");
        let b = board_from(3, "X...O...X");
        assert_eq!(a.structural_hash(), b.structural_hash());
        assert_ne!(
            Board::empty(3).unwrap().structural_hash(),
            a.structural_hash()
        );
    }

    #[test]
    fn test_mover_alternates() {
        let board = Board::empty(3).unwrap();
        assert_eq!(board.mover(), Player::X);
        let board = board.with_move(0, 0, Player::X).unwrap();
        assert_eq!(board.mover(), Player::O);
    }

    #[test]
    fn test_display_renders_grid() {
        let rendered = board_from(3, "X...O....").to_string();
        assert!(rendered.starts_with("-------------\n| X |   |   |"));
        assert_eq!(rendered.lines().count(), 7);
    }
}
