use std::fmt;
use std::fmt::Write as _;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::config::PuzzleConfig;
use crate::error::{Error, Result};
use crate::geometry::{Axis, Cell};
use crate::vehicle::{Move, Vehicle, VehicleId};

/// Anchor position of every vehicle, ordered by id.
///
/// Two configurations are equal exactly when every vehicle sits at the same anchor, so the value
/// doubles as the visited-state key.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Configuration {
    slots: SmallVec<[(VehicleId, Cell); 16]>,
}

impl Configuration {
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, Cell)> + '_ {
        self.slots.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn position_of(&self, id: VehicleId) -> Option<Cell> {
        self.slots
            .binary_search_by_key(&id, |&(slot, _)| slot)
            .ok()
            .map(|i| self.slots[i].1)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, cell)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{id}{cell}")?;
        }
        Ok(())
    }
}

pub struct Board {
    width: i16,
    height: i16,
    exit_row: i16,
    // sorted by id
    vehicles: Vec<Vehicle>,
    occupied: FxHashSet<Cell>,
}

impl Board {
    pub fn new(config: PuzzleConfig) -> Self {
        Board {
            width: config.width,
            height: config.height,
            exit_row: config.exit_row,
            vehicles: Vec::new(),
            occupied: FxHashSet::default(),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> i16 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> i16 {
        self.height
    }

    #[inline(always)]
    pub fn exit_row(&self) -> i16 {
        self.exit_row
    }

    #[inline(always)]
    pub fn extent(&self, axis: Axis) -> i16 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    #[inline(always)]
    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.x <= self.width && cell.y >= 1 && cell.y <= self.height
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline(always)]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    pub fn occupied(&self) -> &FxHashSet<Cell> {
        &self.occupied
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<()> {
        let id = vehicle.id();
        let slot = match self.vehicles.binary_search_by_key(&id, Vehicle::id) {
            Ok(_) => return Err(Error::DuplicateVehicle(id)),
            Err(slot) => slot,
        };

        let (lo, hi) = vehicle.wide_span();
        let extent = i32::from(self.extent(vehicle.axis()));
        if !self.in_bounds(vehicle.position()) || lo < 1 || hi > extent {
            return Err(Error::OutOfBounds {
                id,
                anchor: vehicle.position(),
                length: vehicle.length(),
                width: self.width,
                height: self.height,
            });
        }

        for cell in vehicle.occupied_cells() {
            if let Some(other) = self.occupant_at(cell) {
                return Err(Error::Overlap {
                    id,
                    other: other.id(),
                    cell,
                });
            }
        }

        if id.is_special() {
            if vehicle.axis() != Axis::Horizontal {
                return Err(Error::SpecialNotHorizontal);
            }
            if vehicle.position().y != self.exit_row {
                return Err(Error::SpecialOffExitRow {
                    row: vehicle.position().y,
                    exit_row: self.exit_row,
                });
            }
        }

        self.vehicles.insert(slot, vehicle);
        self.refresh_occupancy();
        Ok(())
    }

    /// Linear scan; meant for rendering and scoring, not for collision checks.
    pub fn occupant_at(&self, cell: Cell) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.covers(cell))
    }

    #[inline(always)]
    fn index_of(&self, id: VehicleId) -> Result<usize> {
        self.vehicles
            .binary_search_by_key(&id, Vehicle::id)
            .map_err(|_| Error::UnknownVehicle(id))
    }

    pub fn vehicle_by_id(&self, id: VehicleId) -> Result<&Vehicle> {
        self.index_of(id).map(|i| &self.vehicles[i])
    }

    pub fn special(&self) -> Result<&Vehicle> {
        self.vehicle_by_id(VehicleId::SPECIAL)
            .map_err(|_| Error::NoSpecialVehicle)
    }

    pub fn refresh_occupancy(&mut self) {
        self.occupied.clear();
        for v in &self.vehicles {
            self.occupied.extend(v.occupied_cells());
        }
    }

    /// Every legal move on the board, ordered by vehicle id, then direction, then distance.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.vehicles.len() * 4);
        for v in &self.vehicles {
            v.extend_legal_moves(self, &mut moves);
        }
        moves
    }

    pub fn snapshot(&self) -> Configuration {
        Configuration {
            slots: self.vehicles.iter().map(|v| (v.id(), v.position())).collect(),
        }
    }

    pub fn restore(&mut self, config: &Configuration) -> Result<()> {
        if config.len() != self.vehicles.len()
            || self
                .vehicles
                .iter()
                .zip(config.iter())
                .any(|(v, (id, _))| v.id() != id)
        {
            return Err(Error::ConfigurationMismatch);
        }

        for (v, (_, position)) in self.vehicles.iter_mut().zip(config.iter()) {
            v.set_position(position);
        }
        self.refresh_occupancy();
        Ok(())
    }

    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        let i = self.index_of(mv.vehicle)?;
        let vehicle = &mut self.vehicles[i];
        if vehicle.axis() != mv.direction.axis() {
            return Err(Error::DirectionMismatch {
                id: mv.vehicle,
                direction: mv.direction,
            });
        }
        vehicle.apply_move(mv.distance, mv.direction);
        self.refresh_occupancy();
        Ok(())
    }

    /// Loads `from`, applies `mv`, hands the result to `inspect`, then puts back whatever
    /// configuration the board held before the call, whether or not `inspect` succeeded.
    pub fn simulate<R>(
        &mut self,
        from: &Configuration,
        mv: Move,
        inspect: impl FnOnce(&Board) -> Result<R>,
    ) -> Result<R> {
        let saved = self.snapshot();
        let outcome = self.inspect_from(from, mv, inspect);
        self.restore(&saved)?;
        outcome
    }

    fn inspect_from<R>(
        &mut self,
        from: &Configuration,
        mv: Move,
        inspect: impl FnOnce(&Board) -> Result<R>,
    ) -> Result<R> {
        self.restore(from)?;
        self.apply_move(mv)?;
        inspect(self)
    }

    /// The special vehicle's far end has reached the right-hand edge.
    pub fn is_goal(&self) -> Result<bool> {
        let special = self.special()?;
        let (_, front) = special.span();
        Ok(front == self.width)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = self.write_grid(&mut out);
        out
    }

    fn write_grid(&self, out: &mut impl fmt::Write) -> fmt::Result {
        out.write_str("   ")?;
        for x in 1..=self.width {
            write!(out, "{x}  ")?;
        }
        out.write_str("\n\n")?;

        for y in 1..=self.height {
            write!(out, "{y}  ")?;
            for x in 1..=self.width {
                match self.occupant_at(Cell::new(x, y)) {
                    Some(v) => write!(out, "{}  ", v.id())?,
                    None => out.write_str("   ")?,
                }
            }
            if y == self.exit_row {
                out.write_str(">> exit")?;
            }
            out.write_str("\n\n")?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    fn vehicle(id: char, length: i16, x: i16, y: i16, facing: &str) -> Vehicle {
        Vehicle::new(VehicleId(id), length, Cell::new(x, y), facing.parse().unwrap()).unwrap()
    }

    fn scenario() -> Board {
        let mut board = Board::new(PuzzleConfig::default());
        board.add_vehicle(vehicle('A', 4, 1, 2, "down")).unwrap();
        board.add_vehicle(vehicle('B', 3, 4, 3, "down")).unwrap();
        board.add_vehicle(vehicle('C', 2, 5, 1, "down")).unwrap();
        board.add_vehicle(vehicle('D', 2, 4, 6, "left")).unwrap();
        board.add_vehicle(vehicle('S', 2, 2, 3, "right")).unwrap();
        board
    }

    fn total_length(board: &Board) -> usize {
        board.vehicles().iter().map(|v| v.length() as usize).sum()
    }

    #[test]
    fn occupancy_is_disjoint_union() {
        let board = scenario();
        assert_eq!(board.occupied().len(), total_length(&board));
        assert!(board.is_occupied(Cell::new(1, 5)));
        assert!(!board.is_occupied(Cell::new(1, 6)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut board = scenario();
        let err = board.add_vehicle(vehicle('C', 2, 6, 4, "down"));
        assert!(matches!(err, Err(Error::DuplicateVehicle(VehicleId('C')))));
    }

    #[test]
    fn registration_checks_bounds_and_overlap() {
        let mut board = scenario();
        assert!(matches!(
            board.add_vehicle(vehicle('E', 3, 6, 5, "down")),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            board.add_vehicle(vehicle('E', 2, 1, 1, "up")),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            board.add_vehicle(vehicle('E', 2, 3, 5, "right")),
            Err(Error::Overlap { other: VehicleId('B'), .. })
        ));
        assert_eq!(board.vehicles().len(), 5);
    }

    #[test]
    fn footprints_near_the_coordinate_limit_are_bounds_checked() {
        let mut board = scenario();
        for far in [
            vehicle('E', 2, i16::MAX, 1, "right"),
            vehicle('E', 2, i16::MIN, 1, "left"),
            vehicle('E', i16::MAX, 6, 1, "down"),
            vehicle('E', i16::MAX, 6, 6, "up"),
        ] {
            assert!(matches!(board.add_vehicle(far), Err(Error::OutOfBounds { .. })));
        }
        assert_eq!(board.vehicles().len(), 5);

        let mut wide = Board::new(PuzzleConfig::new(i16::MAX, 6, 3));
        wide.add_vehicle(vehicle('S', 2, i16::MAX - 1, 3, "right")).unwrap();
        assert!(wide.is_goal().unwrap());
        assert!(matches!(
            wide.add_vehicle(vehicle('A', 2, i16::MAX, 1, "right")),
            Err(Error::OutOfBounds { anchor: Cell { x: i16::MAX, y: 1 }, .. })
        ));
        wide.add_vehicle(vehicle('A', 2, i16::MAX, 1, "left")).unwrap();

        let a = wide.vehicle_by_id(VehicleId('A')).unwrap().legal_moves(&wide);
        assert!(a.iter().all(|m| m.direction == Direction::Left));
        assert_eq!(a.len(), (i16::MAX - 2) as usize);
        assert!(wide.special().unwrap().legal_moves(&wide).iter().all(|m| m.direction == Direction::Left));
    }

    #[test]
    fn special_must_be_horizontal_on_exit_row() {
        let mut board = Board::new(PuzzleConfig::default());
        assert!(matches!(
            board.add_vehicle(vehicle('S', 2, 2, 2, "down")),
            Err(Error::SpecialNotHorizontal)
        ));
        assert!(matches!(
            board.add_vehicle(vehicle('S', 2, 2, 4, "right")),
            Err(Error::SpecialOffExitRow { row: 4, exit_row: 3 })
        ));
    }

    #[test]
    fn lookups_fail_for_unknown_ids() {
        let mut board = Board::new(PuzzleConfig::default());
        board.add_vehicle(vehicle('A', 2, 1, 1, "down")).unwrap();
        assert!(matches!(board.is_goal(), Err(Error::NoSpecialVehicle)));
        assert!(matches!(
            board.vehicle_by_id(VehicleId('Z')),
            Err(Error::UnknownVehicle(VehicleId('Z')))
        ));
        assert!(matches!(
            board.apply_move(Move::new(VehicleId('Z'), 1, Direction::Up)),
            Err(Error::UnknownVehicle(_))
        ));
    }

    #[test]
    fn off_axis_moves_are_rejected_without_mutation() {
        let mut board = scenario();
        let before = board.snapshot();
        let err = board.apply_move(Move::new(VehicleId('S'), 1, Direction::Down));
        assert!(matches!(err, Err(Error::DirectionMismatch { .. })));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn moves_are_reversible() {
        let mut board = scenario();
        let before = board.snapshot();
        for mv in board.all_legal_moves() {
            board.apply_move(mv).unwrap();
            assert_eq!(board.occupied().len(), total_length(&board), "{mv}");
            board.apply_move(mv.reversed()).unwrap();
            assert_eq!(board.snapshot(), before, "{mv}");
        }
    }

    #[test]
    fn snapshot_round_trips() {
        let mut board = scenario();
        let start = board.snapshot();
        board
            .apply_move(Move::new(VehicleId('D'), 1, Direction::Left))
            .unwrap();
        let moved = board.snapshot();
        assert_ne!(start, moved);
        assert_eq!(moved.position_of(VehicleId('D')), Some(Cell::new(3, 6)));

        board.restore(&start).unwrap();
        assert_eq!(board.snapshot(), start);
        assert!(!board.is_occupied(Cell::new(2, 6)));
        board.restore(&moved).unwrap();
        assert_eq!(board.snapshot(), moved);
        assert!(board.is_occupied(Cell::new(2, 6)));
    }

    #[test]
    fn restore_rejects_foreign_configurations() {
        let mut board = scenario();
        let mut other = Board::new(PuzzleConfig::default());
        other.add_vehicle(vehicle('S', 2, 1, 3, "right")).unwrap();
        assert!(matches!(
            board.restore(&other.snapshot()),
            Err(Error::ConfigurationMismatch)
        ));
        assert!(matches!(
            board.restore(&Configuration::default()),
            Err(Error::ConfigurationMismatch)
        ));
    }

    #[test]
    fn all_legal_moves_are_sorted() {
        let board = scenario();
        let moves = board.all_legal_moves();
        let mut sorted = moves.clone();
        sorted.sort_by_key(|m| (m.vehicle, m.direction, m.distance));
        assert_eq!(moves, sorted);
        assert!(moves.contains(&Move::new(VehicleId('D'), 2, Direction::Left)));
        assert!(moves.contains(&Move::new(VehicleId('B'), 2, Direction::Up)));
        assert!(!moves.iter().any(|m| m.vehicle == VehicleId::SPECIAL));
    }

    #[test]
    fn goal_needs_front_on_right_edge() {
        let mut board = Board::new(PuzzleConfig::default());
        board.add_vehicle(vehicle('S', 2, 5, 3, "right")).unwrap();
        assert!(board.is_goal().unwrap());
        board
            .apply_move(Move::new(VehicleId('S'), 1, Direction::Left))
            .unwrap();
        assert!(!board.is_goal().unwrap());

        let mut flipped = Board::new(PuzzleConfig::default());
        flipped.add_vehicle(vehicle('S', 2, 6, 3, "left")).unwrap();
        assert!(flipped.is_goal().unwrap());
    }

    #[test]
    fn simulate_leaves_board_untouched() {
        let mut board = scenario();
        let start = board.snapshot();
        let mv = Move::new(VehicleId('D'), 1, Direction::Left);
        let occupied = board
            .simulate(&start, mv, |b| Ok(b.is_occupied(Cell::new(2, 6))))
            .unwrap();
        assert!(occupied);
        assert_eq!(board.snapshot(), start);

        let failed = board.simulate(&start, Move::new(VehicleId('D'), 1, Direction::Up), |_| Ok(()));
        assert!(matches!(failed, Err(Error::DirectionMismatch { .. })));
        assert_eq!(board.snapshot(), start);
    }

    #[test]
    fn render_marks_vehicles_and_exit() {
        let mut board = Board::new(PuzzleConfig::new(3, 3, 2));
        board.add_vehicle(vehicle('S', 2, 1, 2, "right")).unwrap();
        let blank = format!("{}\n\n", " ".repeat(11));
        let expected = format!(
            "   1  2  3  \n\n1{blank}2  S  S     >> exit\n\n3{blank}"
        );
        assert_eq!(board.render(), expected);
        assert_eq!(board.to_string(), expected);
    }
}
