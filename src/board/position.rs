/// A coordinate on the board: row and column, both `0..=8`.
///
/// Positions are used as members of sets and of the move log, so equality
/// and hashing are part of the contract.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Constructs a new `Position`.
    ///
    /// # Panic
    /// Panics, if row or column is not in the range of `0..=8`.
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9);
        Position { row, col }
    }

    /// Returns the row (`0..=8`).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (`0..=8`).
    pub fn col(self) -> u8 {
        self.col
    }

    /// Returns the number of the 3×3 block containing this position (`0..=8`).
    pub fn block(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Returns all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..81).map(Position::from_cell_index)
    }

    /// Flat row-major cell index (`0..=80`), used by the byte format.
    pub(crate) fn cell_index(self) -> u8 {
        self.row * 9 + self.col
    }

    pub(crate) fn from_cell_index(idx: u8) -> Self {
        Position::new(idx / 9, idx % 9)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_numbers() {
        assert_eq!(Position::new(0, 0).block(), 0);
        assert_eq!(Position::new(2, 8).block(), 2);
        assert_eq!(Position::new(4, 4).block(), 4);
        assert_eq!(Position::new(8, 0).block(), 6);
        assert_eq!(Position::new(8, 8).block(), 8);
    }

    #[test]
    fn enumeration_is_row_major() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 81);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[9], Position::new(1, 0));
        assert_eq!(all[80], Position::new(8, 8));
    }
}
