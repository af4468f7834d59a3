use anyhow::Result;
use day1::{group_totals, top_three_total, top_total};
use itertools::process_results;
use util::{init_logging, read_input_lines, INPUT_FILE};

fn main() -> Result<()> {
    init_logging();

    let totals =
        process_results(read_input_lines(INPUT_FILE)?, |lines| group_totals(lines))??;

    let top = top_total(&totals)?;
    println!("Part-1: The top elve carried {top} calories");

    let top_three = top_three_total(&totals)?;
    println!("Part-2: the top three elves carried a sum of {top_three} calories");

    Ok(())
}
