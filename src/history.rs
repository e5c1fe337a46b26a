//! Undo/redo log for interactive edits.

use crate::board::{Board, Digit, Position};

const LOG_CAPACITY: usize = 100;

/// A single reversible edit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Edit {
    /// The shown digit changed from `old` to `new`.
    Digit {
        /// Digit displayed before the edit, `None` for blank.
        old: Option<Digit>,
        /// Digit displayed after the edit, `None` for blank.
        new: Option<Digit>,
    },
    /// The candidate mark for `digit` was toggled. Undo and redo both toggle
    /// it again, no before/after state needs storing.
    Candidate {
        /// The toggled candidate digit.
        digit: Digit,
    },
}

#[derive(Copy, Clone, Debug)]
struct Move {
    pos: Position,
    edit: Edit,
}

/// Bounded circular log of edits with undo/redo cursors.
///
/// At capacity the oldest entry is silently dropped on the next `record`;
/// undo beyond the ring size is impossible. Recording also truncates the
/// redo tail, as every editor does.
///
/// `undo` and `redo` return the position of the edit that the *next* undo
/// would revert, so a UI can refocus that cell. `None` accordingly means the
/// undo side of the log is empty, not that nothing was applied.
pub struct MoveLog {
    moves: [Option<Move>; LOG_CAPACITY],
    current: usize,
    start: usize,
    end: usize,
}

impl MoveLog {
    /// Creates an empty log.
    pub fn new() -> MoveLog {
        MoveLog {
            moves: [None; LOG_CAPACITY],
            current: 0,
            start: 0,
            end: 0,
        }
    }

    /// Appends an edit at the write cursor. When the ring is full the
    /// oldest entry is dropped to make room.
    pub fn record(&mut self, pos: Position, edit: Edit) {
        self.moves[self.current] = Some(Move { pos, edit });
        self.current = (self.current + 1) % LOG_CAPACITY;
        self.end = self.current;
        if self.end == self.start {
            self.start = (self.start + 1) % LOG_CAPACITY;
        }
    }

    /// Reverts the newest not-yet-undone edit on `board` and reports where
    /// the following undo would apply.
    pub fn undo(&mut self, board: &mut Board) -> Option<Position> {
        if self.current == self.start {
            return None;
        }
        self.current = self.current.checked_sub(1).unwrap_or(LOG_CAPACITY - 1);

        let next = self.next_undo_position();
        if let Some(mv) = self.moves[self.current] {
            let cell = board.cell_mut(mv.pos);
            match mv.edit {
                Edit::Digit { old, .. } => cell.set_shown(old),
                Edit::Candidate { digit } => {
                    let marked = cell.has_candidate(digit);
                    cell.set_candidate(digit, !marked);
                }
            }
        }
        next
    }

    /// Reapplies the newest undone edit on `board` and reports where the
    /// following undo would apply.
    pub fn redo(&mut self, board: &mut Board) -> Option<Position> {
        if self.current == self.end {
            return None;
        }
        if let Some(mv) = self.moves[self.current] {
            let cell = board.cell_mut(mv.pos);
            match mv.edit {
                Edit::Digit { new, .. } => cell.set_shown(new),
                Edit::Candidate { digit } => {
                    let marked = cell.has_candidate(digit);
                    cell.set_candidate(digit, !marked);
                }
            }
        }
        self.current = (self.current + 1) % LOG_CAPACITY;
        self.next_undo_position()
    }

    /// The position the next undo would revert, `None` when there is
    /// nothing left to undo.
    pub fn next_undo_position(&self) -> Option<Position> {
        if self.current == self.start {
            return None;
        }
        let idx = self.current.checked_sub(1).unwrap_or(LOG_CAPACITY - 1);
        self.moves[idx].map(|mv| mv.pos)
    }

    /// Discards all history, for a new game or a loaded board.
    pub fn reset(&mut self) {
        self.current = 0;
        self.start = 0;
        self.end = 0;
    }
}

impl Default for MoveLog {
    fn default() -> Self {
        MoveLog::new()
    }
}
