use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.displacement();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// A position on the half-unit lattice, stored with both axes doubled.
///
/// Adversaries can be observed between two cells while they move, so their
/// positions are kept here instead of in [`Cell`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HalfCell {
    pub x2: i32,
    pub y2: i32,
}

impl HalfCell {
    /// Converts real coordinates, accepting only multiples of one half.
    pub fn from_f64(x: f64, y: f64) -> Result<Self, SnapshotError> {
        let (x2, y2) = (x * 2.0, y * 2.0);
        let on_lattice =
            |v: f64| v.is_finite() && v.fract() == 0.0 && v.abs() <= f64::from(i32::MAX);
        if !on_lattice(x2) || !on_lattice(y2) {
            return Err(SnapshotError::OffLattice { x, y });
        }
        Ok(Self { x2: x2 as i32, y2: y2 as i32 })
    }

    pub fn to_f64(self) -> (f64, f64) {
        (f64::from(self.x2) / 2.0, f64::from(self.y2) / 2.0)
    }

    pub fn shifted(self, offset: ShadowOffset) -> Self {
        Self { x2: self.x2 + offset.dx2, y2: self.y2 + offset.dy2 }
    }
}

impl From<Cell> for HalfCell {
    fn from(cell: Cell) -> Self {
        Self { x2: cell.x * 2, y2: cell.y * 2 }
    }
}

/// Offset in half units from a cell toward an adjacent half-cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadowOffset {
    pub dx2: i32,
    pub dy2: i32,
}

/// The cell itself plus the four half-step positions around it.
pub const SHADOW_OFFSETS: [ShadowOffset; 5] = [
    ShadowOffset { dx2: 0, dy2: 0 },
    ShadowOffset { dx2: 1, dy2: 0 },
    ShadowOffset { dx2: -1, dy2: 0 },
    ShadowOffset { dx2: 0, dy2: 1 },
    ShadowOffset { dx2: 0, dy2: -1 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    /// Neighbor expansion order. Searches depend on it for tie-breaking.
    pub const ALL: [Direction; 4] =
        [Direction::East, Direction::West, Direction::North, Direction::South];

    pub const fn displacement(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
        }
    }

    pub fn from_displacement(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (0, 1) => Some(Direction::North),
            (0, -1) => Some(Direction::South),
            _ => None,
        }
    }

    /// Direction of a single step from `from` to `to`, if they are adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        Self::from_displacement(to.x - from.x, to.y - from.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Survival,
    Foraging,
    Exploration,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionEvent {
    Mapped { walls: usize, corners: usize, floor: usize },
    CornerReached { corner: Cell, next_index: usize },
    ThreatDetected { adversary: HalfCell, path_len: Option<usize> },
    RouteComputed { target: Cell, path_len: usize },
    Decision { tick: u64, position: Cell, mode: Mode, action: Action },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_cell_accepts_only_half_unit_lattice() {
        assert_eq!(HalfCell::from_f64(3.5, 2.0), Ok(HalfCell { x2: 7, y2: 4 }));
        assert_eq!(HalfCell::from_f64(-0.5, 0.0), Ok(HalfCell { x2: -1, y2: 0 }));
        assert_eq!(
            HalfCell::from_f64(1.25, 0.0),
            Err(SnapshotError::OffLattice { x: 1.25, y: 0.0 })
        );
        assert!(matches!(
            HalfCell::from_f64(0.0, f64::NAN),
            Err(SnapshotError::OffLattice { x, .. }) if x == 0.0
        ));
        assert!(HalfCell::from_f64(1e12, 0.0).is_err());
        assert_eq!(HalfCell { x2: 7, y2: 4 }.to_f64(), (3.5, 2.0));
    }

    #[test]
    fn direction_displacements_round_trip_through_between() {
        let origin = Cell::new(4, 4);
        for direction in Direction::ALL {
            assert_eq!(Direction::between(origin, origin.step(direction)), Some(direction));
        }
        assert_eq!(Direction::between(origin, Cell::new(6, 4)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn cells_order_by_x_then_y() {
        let mut cells = vec![Cell::new(2, 0), Cell::new(1, 5), Cell::new(1, 2)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(1, 2), Cell::new(1, 5), Cell::new(2, 0)]);
    }
}
