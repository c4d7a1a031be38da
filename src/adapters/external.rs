//! Externally driven agent
//!
//! Moves come from a [`MoveSource`] (a human at a terminal, a script) rather
//! than a value table. The agent keeps asking until the source names an empty
//! cell that lies on the board, and never learns.

use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use crate::{
    Error, Result,
    ports::{Action, Agent},
    tictactoe::{Board, Cell, Player, StateId, StateSpace},
};

/// Supplier of cell indices (row-major, `0..dim*dim`)
pub trait MoveSource: Send {
    /// Next proposed cell for `board`. May be illegal; the caller re-asks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MoveSourceExhausted`] when no further input exists.
    fn next_position(&mut self, board: &Board) -> Result<usize>;
}

/// Fixed queue of positions, consumed front to back
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    positions: VecDeque<usize>,
}

impl ScriptedMoves {
    pub fn new(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.positions.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_position(&mut self, _board: &Board) -> Result<usize> {
        self.positions.pop_front().ok_or(Error::MoveSourceExhausted)
    }
}

/// Prompts on a writer and reads one integer per line
pub struct LineReader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead + Send, W: Write + Send> LineReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead + Send, W: Write + Send> MoveSource for LineReader<R, W> {
    fn next_position(&mut self, board: &Board) -> Result<usize> {
        loop {
            writeln!(self.output, "{board}")?;
            write!(self.output, "Input your position:")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::MoveSourceExhausted);
            }
            match line.trim().parse::<usize>() {
                Ok(pos) => return Ok(pos),
                Err(_) => continue,
            }
        }
    }
}

/// Agent whose moves come from a [`MoveSource`]
pub struct ExternalAgent<S> {
    name: String,
    role: Player,
    source: S,
    current: Option<StateId>,
}

impl<S: MoveSource> ExternalAgent<S> {
    pub fn new(role: Player, source: S) -> Self {
        Self {
            name: format!("External-{role:?}"),
            role,
            source,
            current: None,
        }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: MoveSource> Agent for ExternalAgent<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Player {
        self.role
    }

    fn reset(&mut self) {
        self.current = None;
    }

    fn observe(&mut self, state: StateId) {
        self.current = Some(state);
    }

    fn act(&mut self, space: &StateSpace) -> Result<Action> {
        let current = self.current.ok_or_else(|| Error::NoCurrentState {
            agent: self.name.clone(),
        })?;
        let board = space.get(current).board();
        if board.occupied_count() == board.size() {
            return Err(Error::NoValidMoves {
                board: board.encode(),
            });
        }

        loop {
            let pos = self.source.next_position(board)?;
            if board.cell_at(pos) == Some(Cell::Empty) {
                let (row, col) = board.pos_to_rowcol(pos);
                return Ok(Action {
                    row,
                    col,
                    role: self.role,
                });
            }
            tracing::debug!(agent = %self.name, position = pos, "rejected illegal position");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_retries_until_legal_cell() {
        let space = StateSpace::enumerate(3).unwrap();
        let occupied = space.next(space.initial(), 0, 0, Player::X).unwrap();

        // 0 is taken, 42 is off the board, 4 is legal
        let mut agent = ExternalAgent::new(Player::O, ScriptedMoves::new([0, 42, 4]));
        agent.observe(occupied);
        let action = agent.act(&space).unwrap();
        assert_eq!((action.row, action.col, action.role), (1, 1, Player::O));
        assert_eq!(agent.into_source().remaining(), 0);
    }

    #[test]
    fn test_exhausted_source_is_an_error() {
        let space = StateSpace::enumerate(3).unwrap();
        let mut agent = ExternalAgent::new(Player::X, ScriptedMoves::new([]));
        agent.observe(space.initial());
        assert!(matches!(
            agent.act(&space),
            Err(Error::MoveSourceExhausted)
        ));
    }

    #[test]
    fn test_line_reader_skips_garbage() {
        let board = Board::empty(3).unwrap();
        let mut output = Vec::new();
        let mut reader = LineReader::new(Cursor::new("abc\n7\n"), &mut output);
        assert_eq!(reader.next_position(&board).unwrap(), 7);
        drop(reader);
        let prompt = String::from_utf8(output).unwrap();
        assert_eq!(prompt.matches("Input your position:").count(), 2);
    }
}
