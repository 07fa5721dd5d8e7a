//! Error types for lane construction and access.

use nasch_core::{CellValue, Velocity};
use std::fmt;

/// Errors arising from lane construction or cell access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lane with zero cells.
    EmptyLane,
    /// The requested length does not fit the cell index range.
    LaneTooLarge {
        /// The requested length.
        len: usize,
        /// The maximum supported length.
        max: usize,
    },
    /// A cell index is outside `[0, len)`.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The lane length.
        len: usize,
    },
    /// A cell value is neither a velocity nor the lane's sentinel.
    InvalidCell {
        /// The offending index.
        index: usize,
        /// The raw value found.
        value: CellValue,
    },
    /// A velocity does not fit in a cell.
    VelocityOutOfRange {
        /// The rejected velocity.
        velocity: Velocity,
        /// Largest storable velocity.
        max: Velocity,
    },
    /// A velocity cannot be stored because it equals the sentinel.
    VelocityIsSentinel {
        /// The rejected velocity.
        velocity: Velocity,
        /// The lane's sentinel.
        empty: CellValue,
    },
    /// A car was placed on a cell that already holds one.
    CellOccupied {
        /// The contested index.
        index: usize,
    },
    /// Two lanes that must share a length do not.
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Length found.
        found: usize,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLane => write!(f, "lane must have at least one cell"),
            Self::LaneTooLarge { len, max } => {
                write!(f, "lane length {len} exceeds maximum {max}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "cell index {index} out of bounds: [0, {len})")
            }
            Self::InvalidCell { index, value } => {
                write!(f, "cell {index} holds invalid value {value}")
            }
            Self::VelocityOutOfRange { velocity, max } => {
                write!(f, "velocity {velocity} exceeds the storable maximum {max}")
            }
            Self::VelocityIsSentinel { velocity, empty } => {
                write!(f, "velocity {velocity} cannot be stored beside sentinel {empty}")
            }
            Self::CellOccupied { index } => write!(f, "cell {index} is already occupied"),
            Self::LengthMismatch { expected, found } => {
                write!(f, "lane length mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
