use std::fmt;

use smallvec::SmallVec;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::geometry::{AnchorEnd, Axis, Cell, Direction, Orientation};

pub type Footprint = SmallVec<[Cell; 4]>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct VehicleId(pub char);

impl VehicleId {
    /// The vehicle whose escape solves the puzzle.
    pub const SPECIAL: VehicleId = VehicleId('S');

    #[inline(always)]
    pub fn is_special(self) -> bool {
        self == Self::SPECIAL
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slide one vehicle `distance` cells toward `direction`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub vehicle: VehicleId,
    pub distance: i16,
    pub direction: Direction,
}

impl Move {
    #[inline(always)]
    pub const fn new(vehicle: VehicleId, distance: i16, direction: Direction) -> Self {
        Move {
            vehicle,
            distance,
            direction,
        }
    }

    /// The move that undoes this one.
    pub fn reversed(self) -> Self {
        Move::new(self.vehicle, self.distance, -self.direction)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.vehicle, self.distance, self.direction)
    }
}

#[derive(Clone, Debug)]
pub struct Vehicle {
    id: VehicleId,
    length: i16,
    orientation: Orientation,
    position: Cell,
}

impl Vehicle {
    pub fn new(id: VehicleId, length: i16, position: Cell, orientation: Orientation) -> Result<Self> {
        if length < 2 {
            return Err(Error::InvalidLength { id, length });
        }
        Ok(Vehicle {
            id,
            length,
            orientation,
            position,
        })
    }

    #[inline(always)]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline(always)]
    pub fn length(&self) -> i16 {
        self.length
    }

    #[inline(always)]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline(always)]
    pub fn axis(&self) -> Axis {
        self.orientation.axis
    }

    /// The anchor cell.
    #[inline(always)]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[inline(always)]
    pub(crate) fn set_position(&mut self, position: Cell) {
        self.position = position;
    }

    /// Lowest and highest coordinate covered along the movement axis, widened so footprints
    /// reaching past the `i16` range stay exact.
    #[inline(always)]
    pub fn wide_span(&self) -> (i32, i32) {
        let anchor = i32::from(self.position.along(self.axis()));
        let reach = i32::from(self.length) - 1;
        match self.orientation.anchor {
            AnchorEnd::Near => (anchor, anchor + reach),
            AnchorEnd::Far => (anchor - reach, anchor),
        }
    }

    /// Lowest and highest coordinate covered along the movement axis.
    ///
    /// Exact for any vehicle a board accepted; ends past the `i16` range saturate.
    #[inline(always)]
    pub fn span(&self) -> (i16, i16) {
        let anchor = self.position.along(self.axis());
        let reach = self.length - 1;
        match self.orientation.anchor {
            AnchorEnd::Near => (anchor, anchor.saturating_add(reach)),
            AnchorEnd::Far => (anchor.saturating_sub(reach), anchor),
        }
    }

    pub fn occupied_cells(&self) -> Footprint {
        let axis = self.axis();
        let (lo, hi) = self.span();
        (lo..=hi).map(|v| self.position.with_along(axis, v)).collect()
    }

    #[inline(always)]
    pub fn covers(&self, cell: Cell) -> bool {
        let axis = self.axis();
        let cross = match axis {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        };
        if cell.along(cross) != self.position.along(cross) {
            return false;
        }
        let (lo, hi) = self.span();
        (lo..=hi).contains(&cell.along(axis))
    }

    /// Shifts the anchor. The owning board's occupancy is stale until it is refreshed.
    #[inline(always)]
    pub fn apply_move(&mut self, distance: i16, direction: Direction) {
        debug_assert_eq!(direction.axis(), self.axis());
        self.position = self.position.offset(direction, distance);
    }

    pub fn legal_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        self.extend_legal_moves(board, &mut moves);
        moves
    }

    /// Appends every collision-free slide, one move per reachable distance, directions in
    /// `Direction` order and distances ascending.
    pub(crate) fn extend_legal_moves(&self, board: &Board, out: &mut Vec<Move>) {
        let axis = self.axis();
        let extent = i32::from(board.extent(axis));
        let (lo, hi) = self.span();

        for direction in axis.directions() {
            let step = i32::from(direction.step());
            let leading = i32::from(if step > 0 { hi } else { lo });
            let mut distance: i16 = 1;
            loop {
                let ahead = leading + step * i32::from(distance);
                if ahead < 1 || ahead > extent {
                    break;
                }
                // `ahead` lies past our own footprint, so any occupant is another vehicle
                let cell = self.position.with_along(axis, ahead as i16);
                if board.is_occupied(cell) {
                    break;
                }
                out.push(Move::new(self.id, distance, direction));
                distance += 1;
            }
        }
    }
}
