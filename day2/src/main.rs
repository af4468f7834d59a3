use anyhow::Result;
use day2::total_scores;
use itertools::process_results;
use util::{init_logging, read_input_lines, INPUT_FILE};

fn main() -> Result<()> {
    init_logging();

    let scores =
        process_results(read_input_lines(INPUT_FILE)?, |lines| total_scores(lines))??;

    println!(
        "Part-1: Your score in rock, paper, scissors against the elves was {}",
        scores.literal
    );
    println!(
        "Part-2: Your score in rock, paper, scissors when adjusting your picks based on the secret code was {}",
        scores.adjusted
    );

    Ok(())
}
