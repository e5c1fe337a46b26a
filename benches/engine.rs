use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use sudoku_engine::{
    Board, BruteForceSolver, CancellableTask, Generator, PropagationSolver, Solver, NORMAL_GIVENS,
};

fn fixed_puzzle() -> Board {
    let task = CancellableTask::new();
    task.start();
    let mut generator = Generator::new(Pcg64Mcg::seed_from_u64(1));
    loop {
        if let Some(board) = generator.generate(NORMAL_GIVENS, &task) {
            return board;
        }
    }
}

fn bench_brute_force(c: &mut Criterion) {
    let puzzle = fixed_puzzle();
    let task = CancellableTask::new();
    task.start();

    c.bench_function("brute_force_solve", |b| {
        b.iter(|| BruteForceSolver::new(&task, true).search_solutions(&puzzle))
    });
}

fn bench_check_unique(c: &mut Criterion) {
    let puzzle = fixed_puzzle();
    let task = CancellableTask::new();
    task.start();

    c.bench_function("check_unique", |b| {
        b.iter(|| {
            let mut board = puzzle.clone();
            PropagationSolver::new(&task).check_unique(&mut board)
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let task = CancellableTask::new();
    task.start();

    c.bench_function("generate_normal", |b| {
        let mut generator = Generator::new(Pcg64Mcg::seed_from_u64(2));
        b.iter(|| generator.generate(NORMAL_GIVENS, &task))
    });
}

criterion_group!(
    benches,
    bench_brute_force,
    bench_check_unique,
    bench_generate
);
criterion_main!(benches);
