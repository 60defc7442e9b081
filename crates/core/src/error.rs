use thiserror::Error;

use crate::types::Cell;

/// Faults raised by the search primitives.
///
/// An unreachable goal is not one of these: searches report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("search start {start:?} is outside the walkable universe")]
    StartOutsideUniverse { start: Cell },

    #[error("heuristic weight must be finite and positive, got {0}")]
    InvalidWeight(f64),

    #[error("death-trap threshold must be at least 1")]
    InvalidThreshold,

    #[error("predecessor chain is broken at {cell:?}")]
    BrokenPredecessorChain { cell: Cell },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("death_trap_threshold must be at least 1")]
    ZeroThreshold,

    #[error("threat_path_limit must be at least 1")]
    ZeroThreatLimit,

    #[error("{field} must be finite and positive, got {value}")]
    InvalidWeight { field: &'static str, value: f64 },

    #[error("corner_advance range {min}..={max} is empty or starts at zero")]
    InvalidCornerAdvance { min: usize, max: usize },
}

/// Faults that abort a decision tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("episode has no corners to explore")]
    NoCorners,
}

/// Malformed host input: layout text or adversary coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("layout is empty")]
    EmptyLayout,

    #[error("layout row {row} has width {width}, expected {expected}")]
    RaggedRow { row: usize, width: usize, expected: usize },

    #[error("unknown glyph {glyph:?} at {cell:?}")]
    UnknownGlyph { glyph: char, cell: Cell },

    #[error("layout has no agent")]
    MissingAgent,

    #[error("layout has more than one agent")]
    DuplicateAgent,

    #[error("position ({x}, {y}) is not on the half-cell lattice")]
    OffLattice { x: f64, y: f64 },
}
