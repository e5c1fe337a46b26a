use crate::board::{Board, Digit, Position};
use crate::solver::{SolutionSet, Solver};
use crate::task::CancellableTask;

/// Recursive backtracking solver.
///
/// Walks the board in row-major order and tries every digit that the
/// precomputed candidate masks and the already placed digits allow. Makes no
/// assumption about the input being solvable, so it is the right solver for
/// user-authored puzzles. Caps the search at one solution when only
/// existence matters, at two when uniqueness is in question.
pub struct BruteForceSolver<'a> {
    task: &'a CancellableTask,
    max_solutions: usize,
    grid: Board,
    solutions: SolutionSet,
}

impl<'a> BruteForceSolver<'a> {
    /// Creates a solver polling `task` for cancellation. With
    /// `stop_after_first` the search ends at the first solution, otherwise
    /// at the second.
    pub fn new(task: &'a CancellableTask, stop_after_first: bool) -> BruteForceSolver<'a> {
        BruteForceSolver {
            task,
            max_solutions: if stop_after_first { 1 } else { 2 },
            grid: Board::new(""),
            solutions: SolutionSet::new(),
        }
    }

    fn check_position(&mut self, idx: u8) {
        if !self.task.is_running() || self.solutions.len() >= self.max_solutions {
            return;
        }
        if idx == 81 {
            self.solutions.add(&self.grid, 0);
            return;
        }

        let pos = Position::from_cell_index(idx);
        if self.grid.cell(pos).is_given() {
            self.check_position(idx + 1);
            return;
        }

        for digit in Digit::all() {
            if !self.task.is_running() {
                return;
            }
            if self.grid.cell(pos).has_candidate(digit) && self.placeable(pos, digit) {
                self.grid.cell_mut(pos).set_shown(Some(digit));
                self.check_position(idx + 1);
            }
        }
        // no cleanup on backtrack: cells at or after `idx` are never
        // consulted by `placeable`, stale digits there cannot mislead it
    }

    /// Checks `digit` at `pos` against the digits placed earlier on the
    /// current path: the rows above in the same column, the columns to the
    /// left in the same row, and the block rows above `pos`. Cells later in
    /// the scan order still hold stale digits from abandoned branches, only
    /// their candidate masks are trustworthy.
    fn placeable(&self, pos: Position, digit: Digit) -> bool {
        let digit = Some(digit);
        for row in 0..pos.row() {
            if self.grid.cell(Position::new(row, pos.col())).shown() == digit {
                return false;
            }
        }
        for col in 0..pos.col() {
            if self.grid.cell(Position::new(pos.row(), col)).shown() == digit {
                return false;
            }
        }
        let base_col = (pos.col() / 3) * 3;
        for row in (pos.row() / 3) * 3..pos.row() {
            for col in base_col..base_col + 3 {
                if self.grid.cell(Position::new(row, col)).shown() == digit {
                    return false;
                }
            }
        }
        true
    }
}

impl Solver for BruteForceSolver<'_> {
    fn search_solutions(&mut self, puzzle: &Board) -> Vec<Board> {
        self.grid = puzzle.clone();
        self.grid.compute_candidates();
        self.solutions.clear();
        self.solutions
            .set_compare_positions(self.grid.empty_positions());
        self.check_position(0);
        self.solutions.take()
    }
}
