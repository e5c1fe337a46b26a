//! The sudoku data model: digits, positions, cells and the board itself.

mod cell;
mod digit;
mod digit_set;
mod grid;
mod position;

pub use cell::Cell;
pub use digit::Digit;
pub use digit_set::{DigitSet, Iter, Unsolvable};
pub use grid::Board;
pub use position::Position;
