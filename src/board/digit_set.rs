//! A fixed-size bitset over the nine sudoku digits.
//!
//! Candidates ("pencil marks") are dealt with all over the solving code.
//! Efficient storage matters, but a raw `u16` would make it too easy to mix
//! up masks and digit values. This module wraps the mask in a dedicated type
//! with set semantics.

use crate::board::Digit;

/// Marker for a dead end: a cell ended up with no remaining candidate.
///
/// This is a sentinel result, not an error. It aborts the current propagation
/// branch and makes the search treat the last guess as wrong.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Unsolvable;

/// Set of candidate digits, one bit per digit (bit `i` ⇔ digit `i + 1`).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct DigitSet(u16);

impl DigitSet {
    /// Set containing all nine digits.
    pub const ALL: DigitSet = DigitSet(0o777);

    /// Empty set.
    pub const NONE: DigitSet = DigitSet(0);

    /// Construct a set from a raw bitmask.
    ///
    /// # Panic
    /// Panics, if the mask contains bits above the ninth.
    pub fn from_bits(mask: u16) -> Self {
        assert!(mask <= Self::ALL.0);
        DigitSet(mask)
    }

    /// Return the raw mask backing the set.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Checks if `digit` is in the set.
    pub fn contains(self, digit: Digit) -> bool {
        self.0 & (1 << digit.as_index()) != 0
    }

    /// Adds `digit` to the set.
    pub fn insert(&mut self, digit: Digit) {
        self.0 |= 1 << digit.as_index();
    }

    /// Deletes `digit` from the set.
    pub fn remove(&mut self, digit: Digit) {
        self.0 &= !(1 << digit.as_index());
    }

    /// Returns the number of digits in the set.
    pub fn len(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Checks whether the set contains no digit.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the only digit in this set, iff exactly 1 digit exists.
    /// An empty set is a dead end and returns `Err(Unsolvable)`.
    /// More than 1 digit returns `Ok(None)`.
    pub fn unique(self) -> Result<Option<Digit>, Unsolvable> {
        match self.len() {
            0 => Err(Unsolvable),
            1 => Ok(self.into_iter().next()),
            _ => Ok(None),
        }
    }
}

/// Iterator over the digits contained in a [`DigitSet`], ascending.
#[derive(Copy, Clone, Debug)]
pub struct Iter(u16);

impl Iterator for Iter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.0 == 0 {
            return None;
        }
        let lowest_bit = self.0 & self.0.wrapping_neg();
        self.0 ^= lowest_bit;
        Some(Digit::from_index(lowest_bit.trailing_zeros() as u8))
    }
}

impl IntoIterator for DigitSet {
    type Item = Digit;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl std::fmt::Binary for DigitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique() {
        assert_eq!(DigitSet::NONE.unique(), Err(Unsolvable));
        let mut set = DigitSet::NONE;
        set.insert(Digit::new(7));
        assert_eq!(set.unique(), Ok(Some(Digit::new(7))));
        set.insert(Digit::new(2));
        assert_eq!(set.unique(), Ok(None));
    }

    #[test]
    fn iteration_is_ascending() {
        let set = DigitSet::from_bits(0b100010010);
        let digits: Vec<u8> = set.into_iter().map(Digit::get).collect();
        assert_eq!(digits, [2, 5, 9]);
    }

    #[test]
    fn insert_remove() {
        let mut set = DigitSet::ALL;
        assert_eq!(set.len(), 9);
        set.remove(Digit::new(4));
        assert!(!set.contains(Digit::new(4)));
        assert_eq!(set.len(), 8);
        set.insert(Digit::new(4));
        assert_eq!(set, DigitSet::ALL);
    }
}
