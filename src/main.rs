use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::error;

use rushhour_solver::batch::{solve_files, Solved};
use rushhour_solver::puzzle::{load_file, save_solution};
use rushhour_solver::{solve, Board, Move, PuzzleConfig, Result, SearchOutcome, SearchReport, SolverConfig};

/// Solves Rush Hour puzzles and writes the moves to a solution file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print every move of the solution together with the resulting grid
    #[arg(short, long)]
    print: bool,

    /// Puzzle files, one `<id> <length> <x>,<y> <orientation>` vehicle per line
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Solution file; only valid with a single input (default: <INPUT>.solution)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = PuzzleConfig::default().width)]
    width: i16,

    #[arg(long, default_value_t = PuzzleConfig::default().height)]
    height: i16,

    /// Row the special vehicle leaves through
    #[arg(long, default_value_t = PuzzleConfig::default().exit_row)]
    exit_row: i16,

    /// Give up after expanding this many positions
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.output.is_some() && args.inputs.len() > 1 {
        Args::command()
            .error(ErrorKind::ArgumentConflict, "--output can only be used with a single input")
            .exit();
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let puzzle = PuzzleConfig::new(args.width, args.height, args.exit_row);
    let mut solver = SolverConfig::default();
    if let Some(max) = args.max_expansions {
        solver = solver.with_max_expansions(max);
    }

    if let [input] = args.inputs.as_slice() {
        let mut board = load_file(input, puzzle)?;
        print!("{board}");
        let report = solve(&mut board, solver)?;
        let output = args.output.clone().unwrap_or_else(|| default_output(input));
        emit(&mut board, &report, &output, args.print)?;
        return Ok(true);
    }

    let mut all_ok = true;
    for (input, result) in args.inputs.iter().zip(solve_files(&args.inputs, puzzle, &solver)) {
        println!("== {}", input.display());
        match result {
            Ok(Solved { mut board, report }) => {
                print!("{board}");
                if let Err(e) = emit(&mut board, &report, &default_output(input), args.print) {
                    error!("{}: {e}", input.display());
                    all_ok = false;
                }
            }
            Err(e) => {
                error!("{}: {e}", input.display());
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".solution");
    PathBuf::from(name)
}

fn emit(board: &mut Board, report: &SearchReport, output: &Path, print: bool) -> Result<()> {
    match &report.outcome {
        SearchOutcome::Solved(moves) => {
            println!("Solved in {} moves", moves.len());
            if print {
                replay(board, moves)?;
            }
            save_solution(output, moves)?;
        }
        SearchOutcome::Exhausted => println!("No Solution Found"),
        SearchOutcome::NodeLimit => println!(
            "No Solution Found (gave up after {} positions)",
            report.expanded
        ),
    }
    Ok(())
}

fn replay(board: &mut Board, moves: &[Move]) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for &mv in moves {
        writeln!(
            stdout,
            "Move {} {} space(s) {}",
            mv.vehicle, mv.distance, mv.direction
        )?;
        board.apply_move(mv)?;
        writeln!(stdout, "{board}")?;
    }
    Ok(())
}
