use crate::board::{Board, Position, Unsolvable};
use crate::solver::{SolutionSet, Solver};
use crate::task::CancellableTask;

/// Constraint-propagation solver with guessing.
///
/// Repeatedly commits singles and hidden singles, and only guesses when
/// propagation stalls. Each guess clones the board, so a dead end simply
/// drops the clone. The number of nested guesses needed to reach the
/// solution is recorded as the board's backtracking depth, a usable proxy
/// for how hard the puzzle feels to a human.
///
/// Expects a board whose givens carry answers, as generated boards do. The
/// known full solution is seeded into the accumulator up front; a uniqueness
/// check then amounts to searching for any second, different solution.
pub struct PropagationSolver<'a> {
    task: &'a CancellableTask,
    solutions: SolutionSet,
}

impl<'a> PropagationSolver<'a> {
    /// Creates a solver polling `task` for cancellation.
    pub fn new(task: &'a CancellableTask) -> PropagationSolver<'a> {
        PropagationSolver {
            task,
            solutions: SolutionSet::new(),
        }
    }

    /// Verifies that `board` has exactly one solution. On success the
    /// board's backtracking depth is set to the depth the search needed,
    /// rating the puzzle as a side effect.
    ///
    /// Returns false for an ambiguous board and for a search cut short by
    /// cancellation.
    pub fn check_unique(&mut self, board: &mut Board) -> bool {
        let solutions = self.search_solutions(board);
        if solutions.len() == 1 && self.task.is_running() {
            board.set_backtracking_depth(solutions[0].backtracking_depth());
            return true;
        }
        false
    }

    fn guess(&mut self, grid: Board, mut empties: Vec<Position>, depth: u16) {
        if !self.task.is_running() || self.solutions.len() > 1 {
            return;
        }
        if empties.is_empty() {
            self.solutions.add(&grid, depth);
            return;
        }

        let pos = empties.remove(0);
        for digit in grid.cell(pos).candidates() {
            if !self.task.is_running() {
                return;
            }
            let mut branch = grid.clone();
            let mut branch_empties = empties.clone();
            branch.set_solved_digit(pos, digit, &mut branch_empties);
            if propagate(&mut branch, &mut branch_empties).is_ok() {
                self.guess(branch, branch_empties, depth + 1);
            }
        }
    }
}

/// Commits singles and hidden singles until a sweep solves no further cell.
/// `Err(Unsolvable)` means some cell ran out of candidates: the board state
/// is a dead end.
fn propagate(grid: &mut Board, empties: &mut Vec<Position>) -> Result<(), Unsolvable> {
    loop {
        let before = empties.len();

        for pos in empties.clone() {
            if let Some(digit) = grid.is_single(pos)? {
                grid.set_solved_digit(pos, digit, empties);
            }
        }
        for pos in empties.clone() {
            if let Some(digit) = grid.is_hidden_single(pos) {
                grid.set_solved_digit(pos, digit, empties);
            }
        }

        if empties.len() == before {
            return Ok(());
        }
    }
}

impl Solver for PropagationSolver<'_> {
    fn search_solutions(&mut self, puzzle: &Board) -> Vec<Board> {
        let mut grid = puzzle.clone();
        let mut empties = grid.empty_positions();

        self.solutions.clear();

        // the answers form the one solution we trust to exist; the search
        // below either rediscovers it (updating its depth) or finds a
        // genuinely different second solution
        let mut trusted = grid.clone();
        trusted.reveal_all();
        self.solutions.add(&trusted, 0);

        grid.initialize_candidates(&mut empties);
        // a failing initial sweep cannot disprove the trusted solution, the
        // guessing pass settles it either way
        let _ = propagate(&mut grid, &mut empties);

        // cells solved by the sweep above are forced the same way in every
        // solution, comparing the still-open cells suffices
        self.solutions.set_compare_positions(empties.clone());
        self.guess(grid, empties, 1);

        self.solutions.take()
    }
}
