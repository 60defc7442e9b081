//! Predecessor bookkeeping and path rebuilding shared by all searches.

use std::collections::BTreeMap;

use crate::error::SearchError;
use crate::types::Cell;

/// Maps each discovered cell to the cell it was reached from.
/// The search start maps to `None`.
pub type PredecessorMap = BTreeMap<Cell, Option<Cell>>;

/// Cells to walk, in travel order, excluding the start and ending at the terminal cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first_step(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn terminal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Walks predecessor links back from `terminal` to the start sentinel.
///
/// A missing link or a chain longer than the map is a search bug and is
/// reported as [`SearchError::BrokenPredecessorChain`].
pub fn reconstruct(terminal: Cell, predecessors: &PredecessorMap) -> Result<Path, SearchError> {
    let mut cells = Vec::new();
    let mut current = terminal;
    loop {
        match predecessors.get(&current) {
            None => {
                tracing::error!(cell = ?current, "predecessor chain broken");
                return Err(SearchError::BrokenPredecessorChain { cell: current });
            }
            Some(None) => break,
            Some(Some(previous)) => {
                cells.push(current);
                if cells.len() > predecessors.len() {
                    tracing::error!(cell = ?current, "predecessor chain loops");
                    return Err(SearchError::BrokenPredecessorChain { cell: current });
                }
                current = *previous;
            }
        }
    }
    cells.reverse();
    Ok(Path { cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(cells: &[(i32, i32)]) -> PredecessorMap {
        let mut map = PredecessorMap::new();
        let mut previous = None;
        for &(x, y) in cells {
            let cell = Cell::new(x, y);
            map.insert(cell, previous);
            previous = Some(cell);
        }
        map
    }

    #[test]
    fn rebuilds_travel_order_without_start() {
        let map = chain(&[(0, 0), (1, 0), (1, 1), (2, 1)]);
        let path = reconstruct(Cell::new(2, 1), &map).expect("chain is complete");
        assert_eq!(path.cells(), &[Cell::new(1, 0), Cell::new(1, 1), Cell::new(2, 1)]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.first_step(), Some(Cell::new(1, 0)));
        assert_eq!(path.terminal(), Some(Cell::new(2, 1)));
    }

    #[test]
    fn terminal_at_start_yields_empty_path() {
        let map = chain(&[(5, 5)]);
        let path = reconstruct(Cell::new(5, 5), &map).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn repeated_reconstruction_is_identical() {
        let map = chain(&[(0, 0), (0, 1), (0, 2)]);
        let first = reconstruct(Cell::new(0, 2), &map).unwrap();
        let second = reconstruct(Cell::new(0, 2), &map).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_link_is_a_fault() {
        let mut map = chain(&[(0, 0), (1, 0)]);
        map.insert(Cell::new(3, 0), Some(Cell::new(2, 0)));
        assert_eq!(
            reconstruct(Cell::new(3, 0), &map),
            Err(SearchError::BrokenPredecessorChain { cell: Cell::new(2, 0) })
        );
    }

    #[test]
    fn cyclic_chain_is_a_fault_not_a_hang() {
        let mut map = PredecessorMap::new();
        map.insert(Cell::new(0, 0), Some(Cell::new(1, 0)));
        map.insert(Cell::new(1, 0), Some(Cell::new(0, 0)));
        assert!(matches!(
            reconstruct(Cell::new(0, 0), &map),
            Err(SearchError::BrokenPredecessorChain { .. })
        ));
    }
}
