#![warn(missing_docs)]
//! A sudoku puzzle engine
//!
//! ## Overview
//!
//! This library generates sudoku puzzles with a guaranteed unique solution,
//! solves arbitrary 9×9 boards, and keeps a bounded undo/redo log for
//! interactive play. Long-running searches cooperate with a shared
//! cancellation flag so a UI thread can abort them.
//!
//! ## Example
//!
//! ```
//! use sudoku_engine::{CancellableTask, GenerateOptions, Generator};
//!
//! let task = CancellableTask::new();
//! assert!(task.start());
//!
//! let mut generator = Generator::new(rand::thread_rng());
//! if let Some(board) = generator.generate_best(&GenerateOptions::normal(), &task) {
//!     // every generated puzzle has exactly one solution
//!     println!("{}", board);
//! }
//! task.finish();
//! ```

mod board;
mod errors;
mod generator;
mod history;
mod solver;
mod task;

pub use crate::board::{Board, Cell, Digit, DigitSet, Iter, Position, Unsolvable};
pub use crate::errors::DecodeError;
pub use crate::generator::{
    label_for, GenerateOptions, Generator, EASY_GIVENS, HARD_GIVENS, NORMAL_GIVENS,
};
pub use crate::history::{Edit, MoveLog};
pub use crate::solver::{BruteForceSolver, PropagationSolver, Solver};
pub use crate::task::{CancellableTask, TaskState};
