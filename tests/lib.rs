use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use sudoku_engine::{
    Board, BruteForceSolver, CancellableTask, DecodeError, Digit, GenerateOptions, Generator,
    Position, PropagationSolver, Solver, NORMAL_GIVENS,
};

fn running_task() -> CancellableTask {
    let task = CancellableTask::new();
    assert!(task.start());
    task
}

fn board_from_rows(rows: &[[u8; 9]; 9]) -> Board {
    let mut board = Board::new("test");
    for (r, row) in rows.iter().enumerate() {
        for (c, &digit) in row.iter().enumerate() {
            if digit != 0 {
                board.set_digit(
                    Position::new(r as u8, c as u8),
                    Some(Digit::new(digit)),
                    true,
                );
            }
        }
    }
    board
}

/// A full valid grid whose four corners of the rectangle (0,0) (0,1)
/// (3,0) (3,1) hold the interchangeable pair 1/2: blanking exactly those
/// four cells leaves a puzzle with two solutions.
const AMBIGUOUS_FULL: [[u8; 9]; 9] = [
    [1, 2, 3, 4, 5, 6, 7, 8, 9],
    [4, 5, 6, 7, 8, 9, 1, 2, 3],
    [7, 8, 9, 1, 2, 3, 4, 5, 6],
    [2, 1, 4, 3, 6, 5, 8, 9, 7],
    [3, 6, 5, 8, 9, 7, 2, 1, 4],
    [8, 9, 7, 2, 1, 4, 3, 6, 5],
    [5, 3, 1, 6, 4, 2, 9, 7, 8],
    [6, 4, 2, 9, 7, 8, 5, 3, 1],
    [9, 7, 8, 5, 3, 1, 6, 4, 2],
];

#[test]
fn generated_puzzle_has_unique_solution() {
    let task = running_task();
    let mut generator = Generator::new(Pcg64Mcg::seed_from_u64(42));

    let mut options = GenerateOptions::normal();
    options.max_attempts = 10;
    let mut board = generator
        .generate_best(&options, &task)
        .expect("no puzzle within 10 attempts");

    assert!(PropagationSolver::new(&task).check_unique(&mut board));
    // the last symmetry group may overshoot the target by up to 3 cells
    assert!(board.number_of_givens() >= NORMAL_GIVENS - 3);
    assert_eq!(board.label(), "normal");

    // the stored answers must form a valid full solution
    board.reveal_all();
    assert!(board.is_valid_solution());
    assert!(board.matches_answers());
}

#[test]
fn diagonal_seed_completes_to_valid_board() {
    let mut board = Board::new("test");
    // fill blocks 0, 4 and 8 with the identity permutation
    for &(base_row, base_col) in &[(0, 0), (3, 3), (6, 6)] {
        for i in 0..9u8 {
            board.set_digit(
                Position::new(base_row + i / 3, base_col + i % 3),
                Some(Digit::new(i + 1)),
                true,
            );
        }
    }

    let task = running_task();
    let solutions = BruteForceSolver::new(&task, true).search_solutions(&board);
    assert_eq!(solutions.len(), 1);
    assert!(solutions[0].is_fully_filled());
    assert!(solutions[0].is_valid_solution());

    // the givens survive into the solution
    assert_eq!(
        solutions[0].cell(Position::new(4, 4)).shown(),
        Some(Digit::new(5))
    );
}

#[test]
fn brute_force_finds_both_solutions_of_ambiguous_puzzle() {
    let mut rows = AMBIGUOUS_FULL;
    rows[0][0] = 0;
    rows[0][1] = 0;
    rows[3][0] = 0;
    rows[3][1] = 0;
    let puzzle = board_from_rows(&rows);

    let task = running_task();
    let solutions = BruteForceSolver::new(&task, false).search_solutions(&puzzle);
    assert_eq!(solutions.len(), 2);
    for solution in &solutions {
        assert!(solution.is_valid_solution());
    }
    assert_ne!(
        solutions[0].cell(Position::new(0, 0)).shown(),
        solutions[1].cell(Position::new(0, 0)).shown()
    );
}

#[test]
fn stop_after_first_caps_the_search() {
    let mut rows = AMBIGUOUS_FULL;
    rows[0][0] = 0;
    rows[0][1] = 0;
    rows[3][0] = 0;
    rows[3][1] = 0;
    let puzzle = board_from_rows(&rows);

    let task = running_task();
    let solutions = BruteForceSolver::new(&task, true).search_solutions(&puzzle);
    assert_eq!(solutions.len(), 1);
}

#[test]
fn check_unique_rejects_ambiguous_puzzle() {
    let mut board = board_from_rows(&AMBIGUOUS_FULL);
    // blanking keeps the answers, as digging does
    for &(r, c) in &[(0, 0), (0, 1), (3, 0), (3, 1)] {
        board.set_digit(Position::new(r, c), None, false);
    }

    let task = running_task();
    assert!(!PropagationSolver::new(&task).check_unique(&mut board));
}

#[test]
fn aborted_task_stops_the_search() {
    let task = running_task();
    task.request_abort();

    let board = Board::new("test");
    let solutions = BruteForceSolver::new(&task, true).search_solutions(&board);
    assert!(solutions.is_empty());
}

#[test]
fn byte_format_round_trip() {
    let mut rows = AMBIGUOUS_FULL;
    rows[8][8] = 0;
    let mut board = board_from_rows(&rows);
    board.set_label("übungs-sudoku");
    board.set_elapsed_ms(123_456);
    board
        .cell_mut(Position::new(8, 8))
        .set_candidate(Digit::new(2), true);
    board
        .cell_mut(Position::new(8, 8))
        .set_candidate(Digit::new(9), true);

    let decoded = Board::from_bytes(&board.to_bytes()).unwrap();
    assert_eq!(decoded, board);
    assert_eq!(decoded.elapsed_ms(), 123_456);
    assert_eq!(decoded.label(), "übungs-sudoku");
    assert!(decoded.cell(Position::new(8, 8)).has_candidate(Digit::new(9)));
}

#[test]
fn truncated_input_fails_to_decode() {
    let board = board_from_rows(&AMBIGUOUS_FULL);
    let bytes = board.to_bytes();
    assert_eq!(
        Board::from_bytes(&bytes[..50]),
        Err(DecodeError::UnexpectedEnd)
    );
    assert_eq!(Board::from_bytes(&[]), Err(DecodeError::UnexpectedEnd));
}

#[test]
fn conflicting_entry_is_reported_from_both_sides() {
    let rows = [[0u8; 9]; 9];
    let mut board = board_from_rows(&rows);
    board.set_digit(Position::new(0, 0), Some(Digit::new(5)), true);
    board.set_digit(Position::new(5, 7), Some(Digit::new(5)), true);

    // same row as one five, same column as none
    let conflicts = board.conflicts_for(Position::new(0, 4), Digit::new(5));
    assert_eq!(conflicts, vec![Position::new(0, 0)]);

    let conflicts = board.conflicts_for(Position::new(5, 0), Digit::new(5));
    assert_eq!(
        conflicts,
        vec![Position::new(5, 7), Position::new(0, 0)]
    );

    assert!(board.conflicts_for(Position::new(8, 8), Digit::new(5)).is_empty());
}

#[test]
fn recomputing_candidates_is_idempotent() {
    let mut rows = AMBIGUOUS_FULL;
    rows[4][4] = 0;
    rows[7][2] = 0;
    let mut board = board_from_rows(&rows);

    let first = board.compute_candidates();
    let masks: Vec<_> = Position::all().map(|p| board.cell(p).candidates()).collect();
    let second = board.compute_candidates();

    assert_eq!(first, second);
    for (pos, mask) in Position::all().zip(masks) {
        assert_eq!(board.cell(pos).candidates(), mask);
    }
}

#[test]
fn duplicate_digit_in_row_invalidates_the_board() {
    let mut rows = AMBIGUOUS_FULL;
    rows[0][4] = 1; // row 0 already has a 1 at column 0
    let board = board_from_rows(&rows);

    assert!(!board.is_valid_solution());
    assert!(board
        .conflicts_for(Position::new(0, 4), Digit::new(1))
        .contains(&Position::new(0, 0)));
    assert!(board
        .conflicts_for(Position::new(0, 0), Digit::new(1))
        .contains(&Position::new(0, 4)));
}

#[test]
fn rule_check_spots_dead_cells() {
    let mut board = Board::new("test");
    assert!(board.obeys_basic_rules());

    // surround (0,0) with all nine digits: 1..=6 in the row, 7..=9 in
    // the column, leaving it without any candidate
    for c in 1..7u8 {
        board.set_digit(Position::new(0, c), Some(Digit::new(c)), true);
    }
    for r in 1..4u8 {
        board.set_digit(Position::new(r, 0), Some(Digit::new(6 + r)), true);
    }
    assert!(!board.obeys_basic_rules());
}

#[test]
fn nearly_solved_cell_is_a_single() {
    let mut rows = AMBIGUOUS_FULL;
    rows[6][6] = 0; // answer is 9
    let mut board = board_from_rows(&rows);
    board.compute_candidates();

    assert_eq!(
        board.is_single(Position::new(6, 6)),
        Ok(Some(Digit::new(9)))
    );
}

#[test]
fn digit_counts_track_shown_digits() {
    let mut rows = AMBIGUOUS_FULL;
    rows[0][0] = 0;
    rows[1][6] = 0; // both blanks are ones
    let board = board_from_rows(&rows);

    let counts = board.digit_counts();
    assert_eq!(counts[0], 2);
    assert_eq!(counts[1], 7);
    assert_eq!(counts[2], 9);
}

#[test]
fn randomized_digits_keep_the_board_valid() {
    let mut board = board_from_rows(&AMBIGUOUS_FULL);
    board.set_all_shown_as_given();

    let mut rng = Pcg64Mcg::seed_from_u64(7);
    board.randomize_digits(&mut rng);
    assert!(board.is_valid_solution());
    assert!(board.matches_answers());
}
