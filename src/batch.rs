use std::path::Path;

use log::debug;
use rayon::prelude::*;

use crate::board::Board;
use crate::config::{PuzzleConfig, SolverConfig};
use crate::error::Result;
use crate::puzzle::load_file;
use crate::solver::{solve, SearchReport};

pub struct Solved {
    /// Back in its initial configuration.
    pub board: Board,
    pub report: SearchReport,
}

/// Loads and solves each puzzle file on the rayon pool. Every puzzle gets its own board, so
/// searches never share state. Results come back in input order.
pub fn solve_files<P>(inputs: &[P], puzzle: PuzzleConfig, solver: &SolverConfig) -> Vec<Result<Solved>>
where
    P: AsRef<Path> + Sync,
{
    inputs
        .par_iter()
        .map(|input| {
            let input = input.as_ref();
            let mut board = load_file(input, puzzle)?;
            let report = solve(&mut board, solver.clone())?;
            debug!(
                "{}: {} moves, {} positions expanded",
                input.display(),
                report.moves().len(),
                report.expanded
            );
            Ok(Solved { board, report })
        })
        .collect()
}
