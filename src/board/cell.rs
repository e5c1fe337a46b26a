use crate::board::{Digit, DigitSet};

/// A single cell of the board.
///
/// Holds the displayed digit, the true answer, the given flag and the
/// candidate mask. If the cell is a given, `shown == answer` and solving and
/// editing code leaves it alone; that invariant is maintained by the callers,
/// not enforced here.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    shown: Option<Digit>,
    answer: Option<Digit>,
    given: bool,
    candidates: DigitSet,
}

impl Cell {
    pub(crate) const EMPTY: Cell = Cell {
        shown: None,
        answer: None,
        given: false,
        candidates: DigitSet::NONE,
    };

    /// The digit currently displayed, `None` for a blank cell.
    pub fn shown(self) -> Option<Digit> {
        self.shown
    }

    /// The correct digit for this cell, if known.
    pub fn answer(self) -> Option<Digit> {
        self.answer
    }

    /// Whether the digit is part of the puzzle and immutable during play.
    pub fn is_given(self) -> bool {
        self.given
    }

    /// The candidate mask. Only meaningful while solving or propagating;
    /// it does not take part in "is this cell filled" decisions.
    pub fn candidates(self) -> DigitSet {
        self.candidates
    }

    /// Sets the displayed digit.
    pub fn set_shown(&mut self, digit: Option<Digit>) {
        self.shown = digit;
    }

    /// Sets the answer digit.
    pub fn set_answer(&mut self, digit: Option<Digit>) {
        self.answer = digit;
    }

    /// Sets or clears the given flag.
    pub fn set_given(&mut self, given: bool) {
        self.given = given;
    }

    /// Replaces the whole candidate mask.
    pub fn set_candidates(&mut self, candidates: DigitSet) {
        self.candidates = candidates;
    }

    /// Checks if `digit` is still a candidate for this cell.
    pub fn has_candidate(self, digit: Digit) -> bool {
        self.candidates.contains(digit)
    }

    /// Marks or unmarks a single candidate digit.
    pub fn set_candidate(&mut self, digit: Digit, mark: bool) {
        if mark {
            self.candidates.insert(digit);
        } else {
            self.candidates.remove(digit);
        }
    }

    /// Byte representation for storage: `answer + shown * 10`, plus `100`
    /// if the cell is a given.
    pub(crate) fn storage_byte(self) -> u8 {
        let answer = self.answer.map_or(0, Digit::get);
        let shown = self.shown.map_or(0, Digit::get);
        answer + shown * 10 + if self.given { 100 } else { 0 }
    }

    /// Rebuilds a cell from its storage byte. Candidates start out empty,
    /// they are stored separately.
    pub(crate) fn from_storage_byte(byte: u8) -> Cell {
        Cell {
            given: byte >= 100,
            shown: Digit::new_checked((byte / 10) % 10),
            answer: Digit::new_checked(byte % 10),
            candidates: DigitSet::NONE,
        }
    }
}
