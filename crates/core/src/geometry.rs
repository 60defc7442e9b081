//! Pure grid helpers shared by every search and by maze mapping.
//! This module does not know about walls; callers filter neighbors themselves.

use std::collections::BTreeSet;

use crate::types::{Cell, Direction, HalfCell};

pub fn neighbors(cell: Cell) -> [Cell; 4] {
    Direction::ALL.map(|direction| cell.step(direction))
}

pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Manhattan distance in half units.
pub fn half_manhattan(a: HalfCell, b: HalfCell) -> u32 {
    a.x2.abs_diff(b.x2) + a.y2.abs_diff(b.y2)
}

/// Moves an exterior corner one unit toward the maze interior.
pub fn interior_corner(raw: Cell) -> Cell {
    let x = if raw.x == 0 { raw.x + 1 } else { raw.x - 1 };
    let y = if raw.y == 0 { raw.y + 1 } else { raw.y - 1 };
    Cell { x, y }
}

/// Every cell in the closed bounding box of `corners`.
pub fn enumerate_floor(corners: &[Cell]) -> BTreeSet<Cell> {
    let mut floor = BTreeSet::new();
    let Some(first) = corners.first() else {
        return floor;
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for corner in corners {
        min_x = min_x.min(corner.x);
        max_x = max_x.max(corner.x);
        min_y = min_y.min(corner.y);
        max_y = max_y.max(corner.y);
    }
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            floor.insert(Cell { x, y });
        }
    }
    floor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_east_west_north_south_order() {
        let cell = Cell::new(3, 3);
        assert_eq!(
            neighbors(cell),
            [Cell::new(4, 3), Cell::new(2, 3), Cell::new(3, 4), Cell::new(3, 2)]
        );
    }

    #[test]
    fn interior_corners_move_inward_on_both_axes() {
        assert_eq!(interior_corner(Cell::new(0, 0)), Cell::new(1, 1));
        assert_eq!(interior_corner(Cell::new(9, 0)), Cell::new(8, 1));
        assert_eq!(interior_corner(Cell::new(0, 6)), Cell::new(1, 5));
        assert_eq!(interior_corner(Cell::new(9, 6)), Cell::new(8, 5));
    }

    #[test]
    fn floor_covers_closed_bounding_box() {
        let corners = [Cell::new(1, 1), Cell::new(3, 1), Cell::new(1, 2), Cell::new(3, 2)];
        let floor = enumerate_floor(&corners);
        assert_eq!(floor.len(), 6);
        assert!(floor.contains(&Cell::new(2, 2)));
        assert!(!floor.contains(&Cell::new(0, 1)));
        assert!(enumerate_floor(&[]).is_empty());
    }

    #[test]
    fn half_manhattan_counts_half_steps() {
        let agent = HalfCell::from(Cell::new(2, 2));
        assert_eq!(half_manhattan(agent, HalfCell { x2: 7, y2: 4 }), 3);
        assert_eq!(manhattan(Cell::new(0, 0), Cell::new(-2, 3)), 5);
    }
}
