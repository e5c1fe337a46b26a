use std::fmt;

use rand::Rng;

use crate::board::{Cell, Digit, DigitSet, Position, Unsolvable};
use crate::errors::DecodeError;

/// Terminator byte of the serialized candidate stream.
const CANDIDATE_STREAM_END: u8 = 110;

/// The 9×9 sudoku board.
///
/// Owns its 81 [`Cell`]s exclusively; cloning deep-copies every cell, which
/// the solvers rely on when they speculate on a working copy. Besides the
/// cells it carries the elapsed play time, a difficulty label and the
/// backtracking depth recorded by the last uniqueness check.
///
/// The "no duplicate digit per row/column/block" property is not enforced by
/// this type. Solving code maintains it and [`Board::is_valid_solution`]
/// verifies it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [Cell; 81],
    elapsed_ms: u64,
    label: String,
    backtracking_depth: u16,
}

impl Board {
    /// Creates an empty board with the given type label.
    pub fn new(label: impl Into<String>) -> Board {
        Board {
            cells: [Cell::EMPTY; 81],
            elapsed_ms: 0,
            label: label.into(),
            backtracking_depth: 0,
        }
    }

    /// Returns the cell at `pos`.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.cell_index() as usize]
    }

    /// Returns the cell at `pos`, mutably.
    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.cell_index() as usize]
    }

    /// Sets the displayed digit at `pos`. A given also fixes the answer.
    pub fn set_digit(&mut self, pos: Position, digit: Option<Digit>, given: bool) {
        let cell = self.cell_mut(pos);
        cell.set_shown(digit);
        cell.set_given(given);
        if given {
            cell.set_answer(digit);
        }
    }

    /// Elapsed play time in milliseconds, as of the last save.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Stores the elapsed play time.
    pub fn set_elapsed_ms(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = elapsed_ms;
    }

    /// The puzzle type label ("easy", "normal", "hard", ...).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the puzzle type label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// The recursion depth at which the last uniqueness check completed the
    /// board. Serves as a difficulty proxy: deeper means harder.
    pub fn backtracking_depth(&self) -> u16 {
        self.backtracking_depth
    }

    /// Records the backtracking depth rating.
    pub fn set_backtracking_depth(&mut self, depth: u16) {
        self.backtracking_depth = depth;
    }

    /// Clears every cell's candidate mask. Needed after generation, to get
    /// rid of the temporary solving state.
    pub fn clear_all_candidates(&mut self) {
        for pos in Position::all() {
            self.cell_mut(pos).set_candidates(DigitSet::NONE);
        }
    }

    /// Recomputes every cell's candidate mask from the currently shown
    /// digits. A filled cell keeps only its own digit; every cell loses the
    /// digits shown elsewhere in its row, column or block.
    ///
    /// Returns the total number of remaining candidates as a complexity
    /// signal: the higher, the more ambiguous the board.
    pub fn compute_candidates(&mut self) -> u16 {
        for pos in Position::all() {
            self.cell_mut(pos).set_candidates(DigitSet::ALL);
        }

        for pos in Position::all() {
            if let Some(own) = self.cell(pos).shown() {
                for digit in Digit::all() {
                    if digit != own {
                        self.cell_mut(pos).set_candidate(digit, false);
                    }
                }
            }
            for peer in peers(pos) {
                if let Some(digit) = self.cell(peer).shown() {
                    self.cell_mut(pos).set_candidate(digit, false);
                }
            }
        }

        Position::all()
            .map(|pos| u16::from(self.cell(pos).candidates().len()))
            .sum()
    }

    /// All positions of not-given cells, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|&pos| !self.cell(pos).is_given())
            .collect()
    }

    /// Checks if every cell displays a digit.
    pub fn is_fully_filled(&self) -> bool {
        Position::all().all(|pos| self.cell(pos).shown().is_some())
    }

    /// Checks if every shown digit equals its answer.
    pub fn matches_answers(&self) -> bool {
        Position::all().all(|pos| {
            let cell = self.cell(pos);
            cell.shown() == cell.answer()
        })
    }

    /// Checks that the board is completely filled and no row, column or
    /// block shows a digit twice.
    pub fn is_valid_solution(&self) -> bool {
        for pos in Position::all() {
            let digit = match self.cell(pos).shown() {
                Some(digit) => digit,
                None => return false,
            };
            if peers(pos).any(|peer| self.cell(peer).shown() == Some(digit)) {
                return false;
            }
        }
        true
    }

    /// Positions in the same row, column or block as `pos` that already show
    /// `digit`. Empty, if entering `digit` at `pos` conflicts with nothing.
    pub fn conflicts_for(&self, pos: Position, digit: Digit) -> Vec<Position> {
        peers(pos)
            .filter(|&peer| self.cell(peer).shown() == Some(digit))
            .collect()
    }

    /// The digits that cannot be entered at `pos` because they are already
    /// shown in its row, column or block. All digits, if `pos` is a given.
    pub fn not_allowed_digits(&self, pos: Position) -> DigitSet {
        if self.cell(pos).is_given() {
            return DigitSet::ALL;
        }
        let mut not_allowed = DigitSet::NONE;
        for peer in peers(pos) {
            if let Some(digit) = self.cell(peer).shown() {
                not_allowed.insert(digit);
            }
        }
        not_allowed
    }

    /// Commits `digit` at `pos` during solving: shows it, marks the cell
    /// fixed, collapses its candidate mask to the single digit, removes
    /// `pos` from `empties` and eliminates `digit` as a candidate from every
    /// still-empty cell sharing a row, column or block with `pos`.
    pub fn set_solved_digit(&mut self, pos: Position, digit: Digit, empties: &mut Vec<Position>) {
        let cell = self.cell_mut(pos);
        cell.set_shown(Some(digit));
        cell.set_given(true);
        cell.set_candidates(DigitSet::NONE);
        cell.set_candidate(digit, true);

        if let Some(idx) = empties.iter().position(|&p| p == pos) {
            empties.remove(idx);
        }

        for &empty in empties.iter() {
            let same_row = empty.row() == pos.row() && empty.col() != pos.col();
            let same_col = empty.col() == pos.col() && empty.row() != pos.row();
            let same_block = empty.block() == pos.block()
                && empty.row() != pos.row()
                && empty.col() != pos.col();
            if same_row || same_col || same_block {
                self.cell_mut(empty).set_candidate(digit, false);
            }
        }
    }

    /// Resets every candidate mask, then commits each given digit via
    /// [`Board::set_solved_digit`] so the empty cells start out with exactly
    /// the digits not excluded by the givens.
    pub(crate) fn initialize_candidates(&mut self, empties: &mut Vec<Position>) {
        for pos in Position::all() {
            self.cell_mut(pos).set_candidates(DigitSet::ALL);
        }
        for pos in Position::all() {
            if self.cell(pos).is_given() {
                if let Some(digit) = self.cell(pos).answer() {
                    self.set_solved_digit(pos, digit, empties);
                }
            }
        }
    }

    /// Checks if `pos` is a "single": `Ok(Some(d))` when only the digit `d`
    /// remains a candidate, `Err(Unsolvable)` when no candidate remains.
    pub fn is_single(&self, pos: Position) -> Result<Option<Digit>, Unsolvable> {
        self.cell(pos).candidates().unique()
    }

    /// Checks if `pos` holds a "hidden single": a candidate digit that has no
    /// other possible place in the cell's row, column or block.
    pub fn is_hidden_single(&self, pos: Position) -> Option<Digit> {
        for digit in self.cell(pos).candidates() {
            if self.is_hidden_single_digit(pos, digit) {
                return Some(digit);
            }
        }
        None
    }

    fn is_hidden_single_digit(&self, pos: Position, digit: Digit) -> bool {
        let count_in = |positions: &mut dyn Iterator<Item = Position>| {
            positions
                .filter(|&p| self.cell(p).has_candidate(digit))
                .count()
        };

        let row = count_in(&mut (0..9).map(|c| Position::new(pos.row(), c)));
        if row == 1 {
            return true;
        }
        let col = count_in(&mut (0..9).map(|r| Position::new(r, pos.col())));
        if col == 1 {
            return true;
        }
        let block = count_in(&mut block_positions(pos));
        block == 1
    }

    /// Blanks the displayed digit at `pos` and drops its given flag.
    /// Returns false if the cell was already blank.
    pub(crate) fn hide(&mut self, pos: Position) -> bool {
        let cell = self.cell_mut(pos);
        if cell.shown().is_none() {
            return false;
        }
        cell.set_shown(None);
        cell.set_given(false);
        true
    }

    /// Restores a hidden cell to its answer and marks it given again.
    pub(crate) fn unhide(&mut self, pos: Position) {
        let cell = self.cell_mut(pos);
        let answer = cell.answer();
        cell.set_shown(answer);
        cell.set_given(true);
    }

    /// Shows the answer at `pos`.
    pub fn reveal(&mut self, pos: Position) {
        let cell = self.cell_mut(pos);
        let answer = cell.answer();
        cell.set_shown(answer);
    }

    /// Shows the answer in every cell.
    pub fn reveal_all(&mut self) {
        for pos in Position::all() {
            self.reveal(pos);
        }
    }

    /// Promotes every shown digit to a given with matching answer. Used on a
    /// freshly solved seed board and on user-authored puzzles before solving.
    pub fn set_all_shown_as_given(&mut self) {
        for pos in Position::all() {
            let cell = self.cell_mut(pos);
            if let Some(digit) = cell.shown() {
                cell.set_answer(Some(digit));
                cell.set_given(true);
            }
        }
    }

    /// The number of given cells.
    pub fn number_of_givens(&self) -> u8 {
        81 - self.empty_positions().len() as u8
    }

    /// The number of empty cells currently solvable as a single or a hidden
    /// single. Rating input: more singles means an easier puzzle.
    pub fn number_of_singles(&self) -> u16 {
        self.empty_positions()
            .into_iter()
            .filter(|&pos| {
                matches!(self.is_single(pos), Ok(Some(_))) || self.is_hidden_single(pos).is_some()
            })
            .count() as u16
    }

    /// Counts the occurrences of every shown digit. Index 0 counts blanks,
    /// indices 1–9 the digits.
    pub fn digit_counts(&self) -> [u8; 10] {
        let mut counts = [0; 10];
        for pos in Position::all() {
            counts[self.cell(pos).shown().map_or(0, |d| d.get() as usize)] += 1;
        }
        counts
    }

    /// Checks a user-edited board against the basic rules: after recomputing
    /// candidates, no cell may be left without any possible digit.
    pub fn obeys_basic_rules(&mut self) -> bool {
        self.compute_candidates();
        Position::all().all(|pos| !self.cell(pos).candidates().is_empty())
    }

    /// Relabels all digits by a sequence of random pair swaps, applied to
    /// answers and shown digits alike. The board stays valid; it just looks
    /// different.
    pub fn randomize_digits(&mut self, rng: &mut impl Rng) {
        for d1 in Digit::all() {
            let mut d2 = d1;
            while d2 == d1 {
                d2 = Digit::new(rng.gen_range(1..10));
            }
            for pos in Position::all() {
                let cell = self.cell_mut(pos);
                let swapped = match cell.answer() {
                    Some(a) if a == d1 => Some(d2),
                    Some(a) if a == d2 => Some(d1),
                    _ => continue,
                };
                cell.set_answer(swapped);
                if cell.shown().is_some() {
                    cell.set_shown(swapped);
                }
            }
        }
    }

    /// Compares the shown digits of two boards at the listed positions only.
    /// Solutions are deduplicated by appearance through this check, with the
    /// originally empty positions as the comparison list.
    pub(crate) fn equal_shown(&self, other: &Board, positions: &[Position]) -> bool {
        positions
            .iter()
            .all(|&pos| self.cell(pos).shown() == other.cell(pos).shown())
    }

    /// Serializes the board: 81 cell bytes in row-major order, the elapsed
    /// time as a big-endian signed 64-bit value, the length-prefixed label
    /// and the candidate stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(81 + 8 + 2 + self.label.len() + 16);

        for pos in Position::all() {
            out.push(self.cell(pos).storage_byte());
        }
        out.extend_from_slice(&(self.elapsed_ms as i64).to_be_bytes());
        out.extend_from_slice(&(self.label.len() as u16).to_be_bytes());
        out.extend_from_slice(self.label.as_bytes());

        // candidate stream: per digit one marker byte, then the flat index
        // of every cell where the digit is still marked
        for digit in Digit::all() {
            let mut marker_written = false;
            for pos in Position::all() {
                if self.cell(pos).has_candidate(digit) {
                    if !marker_written {
                        out.push(100 + digit.as_index() as u8);
                        marker_written = true;
                    }
                    out.push(pos.cell_index());
                }
            }
        }
        out.push(CANDIDATE_STREAM_END);

        out
    }

    /// Deserializes a board produced by [`Board::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Board, DecodeError> {
        let mut reader = Reader { bytes, at: 0 };
        let mut board = Board::new("");

        for pos in Position::all() {
            *board.cell_mut(pos) = Cell::from_storage_byte(reader.read_byte()?);
        }

        let mut time = [0; 8];
        for byte in &mut time {
            *byte = reader.read_byte()?;
        }
        board.elapsed_ms = i64::from_be_bytes(time) as u64;

        let label_len = u16::from_be_bytes([reader.read_byte()?, reader.read_byte()?]);
        let label_bytes = reader.read_slice(label_len as usize)?;
        board.label =
            String::from_utf8(label_bytes.to_vec()).map_err(|_| DecodeError::BadLabel)?;

        let mut digit = None;
        loop {
            let byte = reader.read_byte()?;
            if byte == CANDIDATE_STREAM_END {
                break;
            }
            if byte >= 100 {
                digit = match Digit::new_checked(byte - 100 + 1) {
                    Some(digit) => Some(digit),
                    None => return Err(DecodeError::BadCandidateMarker(byte)),
                };
            } else {
                match digit {
                    Some(digit) if byte < 81 => {
                        let pos = Position::from_cell_index(byte);
                        board.cell_mut(pos).set_candidate(digit, true);
                    }
                    _ => return Err(DecodeError::BadCandidateMarker(byte)),
                }
            }
        }

        Ok(board)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl Reader<'_> {
    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.bytes.get(self.at).ok_or(DecodeError::UnexpectedEnd)?;
        self.at += 1;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        let end = self.at + len;
        let slice = self
            .bytes
            .get(self.at..end)
            .ok_or(DecodeError::UnexpectedEnd)?;
        self.at = end;
        Ok(slice)
    }
}

/// All positions sharing a row, column or block with `pos`, excluding `pos`
/// itself. The 20 peers come out row first, then column, then the rest of
/// the block.
fn peers(pos: Position) -> impl Iterator<Item = Position> {
    let row_peers = (0..9)
        .filter(move |&c| c != pos.col())
        .map(move |c| Position::new(pos.row(), c));
    let col_peers = (0..9)
        .filter(move |&r| r != pos.row())
        .map(move |r| Position::new(r, pos.col()));
    let block_peers =
        block_positions(pos).filter(move |&p| p.row() != pos.row() && p.col() != pos.col());
    row_peers.chain(col_peers).chain(block_peers)
}

fn block_positions(pos: Position) -> impl Iterator<Item = Position> {
    let base_row = (pos.row() / 3) * 3;
    let base_col = (pos.col() / 3) * 3;
    (0..9).map(move |i| Position::new(base_row + i / 3, base_col + i % 3))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in Position::all() {
            match (pos.row(), pos.col()) {
                (0, 0) => {}
                (3, 0) | (6, 0) => write!(f, "\n\n")?,
                (_, 0) => writeln!(f)?,
                (_, 3) | (_, 6) => write!(f, " ")?,
                _ => {}
            }
            match self.cell(pos).shown() {
                Some(digit) => write!(f, "{}", digit)?,
                None => write!(f, "_")?,
            }
        }
        Ok(())
    }
}
