//! Shared maze fixtures for unit tests across modules.

use std::collections::BTreeSet;

use crate::geometry::{enumerate_floor, interior_corner};
use crate::sensor::Snapshot;
use crate::types::Cell;

/// Walls and floor parsed from text rows; only `%` and `P` are significant.
pub(crate) struct Maze {
    pub(crate) walls: BTreeSet<Cell>,
    pub(crate) floor: BTreeSet<Cell>,
    pub(crate) raw_corners: Vec<Cell>,
    agent: Option<Cell>,
}

impl Maze {
    pub(crate) fn parse(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows[0].chars().count() as i32;
        let mut walls = BTreeSet::new();
        let mut agent = None;
        for (row_index, row) in rows.iter().enumerate() {
            let y = height - 1 - row_index as i32;
            for (x, glyph) in row.chars().enumerate() {
                let cell = Cell::new(x as i32, y);
                match glyph {
                    '%' => {
                        walls.insert(cell);
                    }
                    'P' => agent = Some(cell),
                    _ => {}
                }
            }
        }
        let raw_corners = vec![
            Cell::new(0, 0),
            Cell::new(width - 1, 0),
            Cell::new(0, height - 1),
            Cell::new(width - 1, height - 1),
        ];
        let interior: Vec<Cell> = raw_corners.iter().copied().map(interior_corner).collect();
        let floor = enumerate_floor(&interior);
        Self { walls, floor, raw_corners, agent }
    }

    pub(crate) fn agent(&self) -> Cell {
        self.agent.expect("fixture should place an agent")
    }
}

pub(crate) fn snapshot(rows: &[&str]) -> Snapshot {
    Snapshot::from_ascii(&rows.join("\n")).expect("fixture layout should parse")
}

pub(crate) fn open_room(width: usize, height: usize, agent: Cell) -> Snapshot {
    let mut rows = Vec::with_capacity(height);
    for y in (0..height).rev() {
        let mut row = String::with_capacity(width);
        for x in 0..width {
            let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            let glyph = if border {
                '%'
            } else if (x as i32, y as i32) == (agent.x, agent.y) {
                'P'
            } else {
                ' '
            };
            row.push(glyph);
        }
        rows.push(row);
    }
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    snapshot(&rows)
}
