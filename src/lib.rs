//! Solver for the Rush Hour sliding-block puzzle.
//!
//! Vehicles of fixed length slide along their own axis on a rectangular board. The goal is to slide
//! the special vehicle `S` out through the right-hand edge of the exit row. A single [`Board`] is
//! mutated in place during search; alternate states are saved and restored as [`Configuration`]s
//! rather than cloned boards.

pub mod batch;
pub mod board;
pub mod config;
pub mod error;
pub mod frontier;
pub mod geometry;
pub mod puzzle;
pub mod solver;
pub mod vehicle;

pub use board::{Board, Configuration};
pub use config::{PuzzleConfig, SolverConfig};
pub use error::{Error, Result};
pub use frontier::PriorityFrontier;
pub use geometry::{AnchorEnd, Axis, Cell, Direction, Orientation};
pub use solver::{heuristic, solve, Path, SearchOutcome, SearchReport, Solver};
pub use vehicle::{Move, Vehicle, VehicleId};
