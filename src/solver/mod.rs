//! The two solving strategies.
//!
//! [`BruteForceSolver`] tries digits cell by cell and backtracks on
//! conflicts; it is the workhorse for completing a seeded board quickly.
//! [`PropagationSolver`] alternates constraint propagation with guessing and
//! records how deep it had to guess, which doubles as a difficulty rating.
//! Both run under a [`CancellableTask`](crate::CancellableTask) and stop
//! searching early once a second solution proves a puzzle ambiguous.

mod brute_force;
mod propagation;

pub use brute_force::BruteForceSolver;
pub use propagation::PropagationSolver;

use crate::board::{Board, Position};

/// A sudoku solving strategy.
pub trait Solver {
    /// Searches for solutions of `puzzle`, up to the solver's solution cap.
    /// An aborted task or an unsolvable puzzle yields an empty vector.
    fn search_solutions(&mut self, puzzle: &Board) -> Vec<Board>;
}

/// Accumulator for distinct solutions found during a search.
///
/// Two boards count as the same solution when their shown digits agree at
/// every originally empty position; the givens are identical by construction.
pub(crate) struct SolutionSet {
    solutions: Vec<Board>,
    compare_positions: Vec<Position>,
}

impl SolutionSet {
    pub(crate) fn new() -> SolutionSet {
        SolutionSet {
            solutions: Vec::new(),
            compare_positions: Vec::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.solutions.clear();
        self.compare_positions.clear();
    }

    pub(crate) fn set_compare_positions(&mut self, positions: Vec<Position>) {
        self.compare_positions = positions;
    }

    /// Adds a solved board unless an equal solution is already present.
    /// A duplicate still updates the stored board's backtracking depth, so
    /// the depth reflects the latest path that reached the solution.
    /// Returns true if the board was new.
    pub(crate) fn add(&mut self, board: &Board, depth: u16) -> bool {
        for known in &mut self.solutions {
            if known.equal_shown(board, &self.compare_positions) {
                known.set_backtracking_depth(depth);
                return false;
            }
        }
        let mut solution = board.clone();
        solution.set_backtracking_depth(depth);
        self.solutions.push(solution);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.solutions.len()
    }

    pub(crate) fn take(&mut self) -> Vec<Board> {
        std::mem::take(&mut self.solutions)
    }
}
