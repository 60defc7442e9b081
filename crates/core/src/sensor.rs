//! Query boundary between the host's per-tick state and the decision engine.
//! [`Snapshot`] is a plain value implementation used by fixtures and traces.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::types::{Action, Cell, Direction, HalfCell};

/// What the policy may ask about the current tick.
pub trait Sensor {
    fn walls(&self) -> BTreeSet<Cell>;
    /// Exterior corners of the maze, before any interior adjustment.
    fn corners(&self) -> Vec<Cell>;
    fn agent_position(&self) -> Cell;
    /// Legal cardinal moves plus [`Action::Stop`].
    fn legal_actions(&self) -> BTreeSet<Action>;
    fn food(&self) -> BTreeSet<Cell>;
    fn capsules(&self) -> BTreeSet<Cell>;
    fn adversaries(&self) -> Vec<HalfCell>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub walls: BTreeSet<Cell>,
    pub corners: Vec<Cell>,
    pub agent: Cell,
    pub legal: BTreeSet<Action>,
    pub food: BTreeSet<Cell>,
    pub capsules: BTreeSet<Cell>,
    pub adversaries: Vec<HalfCell>,
}

impl Snapshot {
    /// Parses a text layout: `%` wall, `.` food, `o` capsule, `G` adversary,
    /// `P` agent, space floor. The first row is the top (highest `y`).
    pub fn from_ascii(layout: &str) -> Result<Self, SnapshotError> {
        let rows: Vec<&str> = layout.lines().filter(|row| !row.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(SnapshotError::EmptyLayout);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut walls = BTreeSet::new();
        let mut food = BTreeSet::new();
        let mut capsules = BTreeSet::new();
        let mut adversaries = Vec::new();
        let mut agent = None;

        for (row_index, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(SnapshotError::RaggedRow {
                    row: row_index,
                    width: row_width,
                    expected: width,
                });
            }
            let y = (height - 1 - row_index) as i32;
            for (x, glyph) in row.chars().enumerate() {
                let cell = Cell { x: x as i32, y };
                match glyph {
                    '%' => {
                        walls.insert(cell);
                    }
                    '.' => {
                        food.insert(cell);
                    }
                    'o' => {
                        capsules.insert(cell);
                    }
                    'G' => adversaries.push(HalfCell::from(cell)),
                    'P' => {
                        if agent.replace(cell).is_some() {
                            return Err(SnapshotError::DuplicateAgent);
                        }
                    }
                    ' ' => {}
                    _ => return Err(SnapshotError::UnknownGlyph { glyph, cell }),
                }
            }
        }

        let agent = agent.ok_or(SnapshotError::MissingAgent)?;
        let (max_x, max_y) = (width as i32 - 1, height as i32 - 1);
        let corners =
            vec![Cell::new(0, 0), Cell::new(max_x, 0), Cell::new(0, max_y), Cell::new(max_x, max_y)];
        let legal = legal_actions_at(&walls, agent);

        Ok(Self { walls, corners, agent, legal, food, capsules, adversaries })
    }

    /// Applies `action` the way a minimal host would: the agent moves unless
    /// blocked, and any food or capsule on the new cell is consumed.
    pub fn advanced(&self, action: Action) -> Self {
        let mut next = self.clone();
        if let Action::Move(direction) = action {
            let target = self.agent.step(direction);
            if !self.walls.contains(&target) {
                next.agent = target;
            }
        }
        next.food.remove(&next.agent);
        next.capsules.remove(&next.agent);
        next.legal = legal_actions_at(&next.walls, next.agent);
        next
    }
}

pub fn legal_actions_at(walls: &BTreeSet<Cell>, cell: Cell) -> BTreeSet<Action> {
    let mut legal: BTreeSet<Action> = Direction::ALL
        .into_iter()
        .filter(|direction| !walls.contains(&cell.step(*direction)))
        .map(Action::Move)
        .collect();
    legal.insert(Action::Stop);
    legal
}

impl Sensor for Snapshot {
    fn walls(&self) -> BTreeSet<Cell> {
        self.walls.clone()
    }

    fn corners(&self) -> Vec<Cell> {
        self.corners.clone()
    }

    fn agent_position(&self) -> Cell {
        self.agent
    }

    fn legal_actions(&self) -> BTreeSet<Action> {
        self.legal.clone()
    }

    fn food(&self) -> BTreeSet<Cell> {
        self.food.clone()
    }

    fn capsules(&self) -> BTreeSet<Cell> {
        self.capsules.clone()
    }

    fn adversaries(&self) -> Vec<HalfCell> {
        self.adversaries.clone()
    }
}
