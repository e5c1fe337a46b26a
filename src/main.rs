use sudoku_engine::{CancellableTask, GenerateOptions, Generator};

fn main() {
    env_logger::init();

    let task = CancellableTask::new();
    let mut generator = Generator::new(rand::thread_rng());

    for options in &[
        GenerateOptions::easy(),
        GenerateOptions::normal(),
        GenerateOptions::hard(),
    ] {
        task.start();
        match generator.generate_best(options, &task) {
            Some(board) => {
                println!(
                    "{} puzzle, {} givens, depth {}:\n{}\n",
                    board.label(),
                    board.number_of_givens(),
                    board.backtracking_depth(),
                    board
                );
            }
            None => eprintln!("generation failed within the time budget"),
        }
        task.finish();
    }
}
