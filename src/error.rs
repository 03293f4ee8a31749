use thiserror::Error;

use crate::geometry::{Cell, Direction};
use crate::vehicle::VehicleId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid orientation `{0}` (expected up, down, left or right)")]
    InvalidOrientation(String),

    #[error("vehicle {id} has length {length}; vehicles must be at least 2 cells long")]
    InvalidLength { id: VehicleId, length: i16 },

    #[error("vehicle {0} is already on the board")]
    DuplicateVehicle(VehicleId),

    #[error("no vehicle with id {0}")]
    UnknownVehicle(VehicleId),

    #[error("no special vehicle `S` has been registered")]
    NoSpecialVehicle,

    #[error("special vehicle must face left or right")]
    SpecialNotHorizontal,

    #[error("special vehicle sits on row {row}, exit is on row {exit_row}")]
    SpecialOffExitRow { row: i16, exit_row: i16 },

    #[error("vehicle {id} of length {length} anchored at {anchor} leaves the {width}x{height} board")]
    OutOfBounds {
        id: VehicleId,
        anchor: Cell,
        length: i16,
        width: i16,
        height: i16,
    },

    #[error("vehicle {id} overlaps vehicle {other} at {cell}")]
    Overlap {
        id: VehicleId,
        other: VehicleId,
        cell: Cell,
    },

    #[error("vehicle {id} cannot move {direction}")]
    DirectionMismatch { id: VehicleId, direction: Direction },

    #[error("configuration does not match the vehicles on the board")]
    ConfigurationMismatch,

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
