//! Cells, slide directions and vehicle orientation.
//!
//! Coordinates are 1-indexed: `x` counts columns from the left edge, `y` counts rows from the top.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use strum::{Display, EnumString, VariantArray};

use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(C)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    #[inline(always)]
    pub const fn new(x: i16, y: i16) -> Self {
        Cell { x, y }
    }

    /// Coordinate along `axis`.
    #[inline(always)]
    pub fn along(self, axis: Axis) -> i16 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Same cell with its coordinate along `axis` replaced.
    #[inline(always)]
    pub fn with_along(self, axis: Axis, value: i16) -> Self {
        match axis {
            Axis::Horizontal => Cell::new(value, self.y),
            Axis::Vertical => Cell::new(self.x, value),
        }
    }

    /// Cell `distance` steps toward `direction`, saturating at the `i16` range.
    #[inline(always)]
    pub fn offset(self, direction: Direction, distance: i16) -> Self {
        let axis = direction.axis();
        let shift = direction.step().saturating_mul(distance);
        self.with_along(axis, self.along(axis).saturating_add(shift))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both directions along this axis, in `Direction` order.
    #[inline(always)]
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }
}

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Display, EnumString, VariantArray,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[inline(always)]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Unit step along the axis: rightward and downward grow the coordinate.
    #[inline(always)]
    pub const fn step(self) -> i16 {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }

    #[inline(always)]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.opposite()
    }
}

/// Which end of the footprint the anchor cell marks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AnchorEnd {
    /// Anchor is the lowest coordinate; the body extends toward higher coordinates.
    Near,
    /// Anchor is the highest coordinate; the body extends toward lower coordinates.
    Far,
}

/// A vehicle's fixed orientation, split into its movement axis and anchor end.
///
/// `right` and `down` anchor the near end, `left` and `up` anchor the far end.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Orientation {
    pub axis: Axis,
    pub anchor: AnchorEnd,
}

impl Orientation {
    /// The direction the body extends in from its anchor.
    pub const fn facing(self) -> Direction {
        match (self.axis, self.anchor) {
            (Axis::Horizontal, AnchorEnd::Near) => Direction::Right,
            (Axis::Horizontal, AnchorEnd::Far) => Direction::Left,
            (Axis::Vertical, AnchorEnd::Near) => Direction::Down,
            (Axis::Vertical, AnchorEnd::Far) => Direction::Up,
        }
    }
}

impl From<Direction> for Orientation {
    fn from(facing: Direction) -> Self {
        let anchor = if facing.step() > 0 {
            AnchorEnd::Near
        } else {
            AnchorEnd::Far
        };
        Orientation {
            axis: facing.axis(),
            anchor,
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_str(s)
            .map(Orientation::from)
            .map_err(|_| Error::InvalidOrientation(s.to_string()))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.facing())
    }
}
