//! Puzzle generation: seed a full board, then dig symmetric holes while the
//! propagation solver keeps the solution unique.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Digit, Position};
use crate::solver::{BruteForceSolver, PropagationSolver, Solver};
use crate::task::CancellableTask;

/// Givens left on an easy puzzle.
pub const EASY_GIVENS: u8 = 40;
/// Givens left on a normal puzzle.
pub const NORMAL_GIVENS: u8 = 33;
/// Givens left on a hard puzzle.
pub const HARD_GIVENS: u8 = 23;

/// Holes dug in one go before the first uniqueness check. Digging this many
/// without checking rarely breaks uniqueness but saves as many solver runs.
const BULK_DIG: u8 = 36;

/// The difficulty label matching a number of givens.
pub fn label_for(givens: u8) -> &'static str {
    if givens <= HARD_GIVENS {
        "hard"
    } else if givens <= NORMAL_GIVENS {
        "normal"
    } else {
        "easy"
    }
}

/// Mirror pattern applied while digging, so the holes come out symmetric the
/// way newspaper puzzles are.
#[derive(Copy, Clone, Debug)]
enum Symmetry {
    /// Mirror across the main diagonal.
    Transpose,
    /// Point symmetry through the center cell.
    Rotate180,
    /// Mirror across both center axes.
    QuadMirror,
}

impl Symmetry {
    fn choose(rng: &mut impl Rng) -> Symmetry {
        match rng.gen_range(0..3) {
            0 => Symmetry::Transpose,
            1 => Symmetry::Rotate180,
            _ => Symmetry::QuadMirror,
        }
    }

    /// The group of positions dug together: `pos` and its mirror images.
    fn group(self, pos: Position) -> Vec<Position> {
        let (row, col) = (pos.row(), pos.col());
        let mut group = vec![pos];
        let mirrors = match self {
            Symmetry::Transpose => vec![Position::new(col, row)],
            Symmetry::Rotate180 => vec![Position::new(8 - row, 8 - col)],
            Symmetry::QuadMirror => vec![
                Position::new(row, 8 - col),
                Position::new(8 - row, col),
                Position::new(8 - row, 8 - col),
            ],
        };
        for mirror in mirrors {
            if !group.contains(&mirror) {
                group.push(mirror);
            }
        }
        group
    }
}

/// Tuning knobs for [`Generator::generate_best`].
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Givens to leave on the board.
    pub target_givens: u8,
    /// Upper bound on generation attempts.
    pub max_attempts: u32,
    /// No new attempt is started once this much time has passed.
    pub time_budget: Duration,
}

impl GenerateOptions {
    fn with_target(target_givens: u8) -> GenerateOptions {
        GenerateOptions {
            target_givens,
            max_attempts: 20,
            time_budget: Duration::from_secs(10),
        }
    }

    /// Preset for an easy puzzle.
    pub fn easy() -> GenerateOptions {
        GenerateOptions::with_target(EASY_GIVENS)
    }

    /// Preset for a normal puzzle.
    pub fn normal() -> GenerateOptions {
        GenerateOptions::with_target(NORMAL_GIVENS)
    }

    /// Preset for a hard puzzle.
    pub fn hard() -> GenerateOptions {
        GenerateOptions::with_target(HARD_GIVENS)
    }
}

/// Unique-solution puzzle generator.
pub struct Generator<R: Rng> {
    rng: R,
}

/// A generated board together with its rating inputs.
struct Rated {
    board: Board,
    depth: u16,
    singles: u16,
    givens: u8,
}

impl Rated {
    fn new(board: Board) -> Rated {
        let mut scratch = board.clone();
        scratch.compute_candidates();
        Rated {
            depth: board.backtracking_depth(),
            singles: scratch.number_of_singles(),
            givens: board.number_of_givens(),
            board,
        }
    }

    /// Harder beats easier: more backtracking depth first, then fewer
    /// directly solvable cells, then fewer givens.
    fn beats(&self, other: &Rated) -> bool {
        let score = |r: &Rated| {
            (
                std::cmp::Reverse(r.depth),
                u16::from(r.givens) + r.singles,
                r.givens,
            )
        };
        score(self) < score(other)
    }
}

impl<R: Rng> Generator<R> {
    /// Creates a generator drawing from `rng`.
    pub fn new(rng: R) -> Generator<R> {
        Generator { rng }
    }

    /// One generation attempt: seeds a full board and digs it down towards
    /// `target_givens` under a random symmetry.
    ///
    /// Returns `None` when the bulk dig happens to break uniqueness or the
    /// task is aborted. Running out of safely diggable cells above the
    /// target is not a failure; the board is returned with more givens than
    /// asked for.
    pub fn generate(&mut self, target_givens: u8, task: &CancellableTask) -> Option<Board> {
        let mut board = self.seeded_full_board(task)?;
        self.dig_holes(&mut board, target_givens, task)?;
        board.set_label(label_for(target_givens));
        board.clear_all_candidates();
        Some(board)
    }

    /// Runs generation attempts until the time budget or the attempt cap is
    /// exhausted and returns the highest-rated puzzle, with its digits
    /// relabeled at random as a final disguise.
    pub fn generate_best(
        &mut self,
        options: &GenerateOptions,
        task: &CancellableTask,
    ) -> Option<Board> {
        let started = Instant::now();
        let mut best: Option<Rated> = None;

        for attempt in 0..options.max_attempts {
            if !task.is_running() || started.elapsed() >= options.time_budget {
                break;
            }
            match self.generate(options.target_givens, task) {
                Some(board) => {
                    let rated = Rated::new(board);
                    log::debug!(
                        "attempt {}: depth {}, singles {}, givens {}",
                        attempt,
                        rated.depth,
                        rated.singles,
                        rated.givens
                    );
                    if best.as_ref().map_or(true, |b| rated.beats(b)) {
                        best = Some(rated);
                    }
                }
                None => log::debug!("attempt {}: dig broke uniqueness, retrying", attempt),
            }
        }

        best.map(|rated| {
            let mut board = rated.board;
            board.randomize_digits(&mut self.rng);
            board
        })
    }

    /// Builds a full valid board: fills the three diagonal blocks with
    /// random permutations (they share no row or column, so any filling is
    /// conflict-free) and lets the brute-force solver complete the rest.
    fn seeded_full_board(&mut self, task: &CancellableTask) -> Option<Board> {
        let mut board = Board::new("");
        for &block in &[0u8, 4, 8] {
            let mut digits: Vec<Digit> = Digit::all().collect();
            digits.shuffle(&mut self.rng);
            let base_row = (block / 3) * 3;
            let base_col = (block % 3) * 3;
            for (i, &digit) in digits.iter().enumerate() {
                let pos = Position::new(base_row + i as u8 / 3, base_col + i as u8 % 3);
                board.set_digit(pos, Some(digit), true);
            }
        }

        let mut solver = BruteForceSolver::new(task, true);
        let mut full = solver.search_solutions(&board).pop()?;
        full.set_all_shown_as_given();
        Some(full)
    }

    /// Digs holes under a random symmetry: a bulk phase with a single
    /// uniqueness check at the end, then one check per group, undoing any
    /// group that makes the solution ambiguous.
    fn dig_holes(
        &mut self,
        board: &mut Board,
        target_givens: u8,
        task: &CancellableTask,
    ) -> Option<()> {
        let symmetry = Symmetry::choose(&mut self.rng);
        let mut untouched: Vec<Position> = Position::all().collect();

        let mut dug: u8 = 0;
        while dug < BULK_DIG {
            let group = self.next_group(&mut untouched, symmetry)?;
            for &pos in &group {
                if board.hide(pos) {
                    dug += 1;
                }
            }
        }
        if !PropagationSolver::new(task).check_unique(board) {
            // this layout cannot take the bulk dig, give up on the attempt
            return None;
        }

        while board.number_of_givens() > target_givens && task.is_running() {
            let group = match self.next_group(&mut untouched, symmetry) {
                Some(group) => group,
                None => break,
            };
            let mut hidden = Vec::with_capacity(group.len());
            for &pos in &group {
                if board.hide(pos) {
                    hidden.push(pos);
                }
            }
            if hidden.is_empty() {
                continue;
            }
            if !PropagationSolver::new(task).check_unique(board) {
                for pos in hidden {
                    board.unhide(pos);
                }
            }
        }

        if task.is_running() {
            Some(())
        } else {
            None
        }
    }

    /// Picks a random still-untouched position and expands it to its
    /// symmetry group, removing the whole group from the untouched list.
    fn next_group(
        &mut self,
        untouched: &mut Vec<Position>,
        symmetry: Symmetry,
    ) -> Option<Vec<Position>> {
        if untouched.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..untouched.len());
        let group = symmetry.group(untouched.swap_remove(idx));
        untouched.retain(|pos| !group.contains(pos));
        Some(group)
    }
}
