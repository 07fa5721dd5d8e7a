//! Error types shared across the Nasch workspace.
//!
//! Organized by subsystem: lane initialization, invariant checking, and
//! the renderer collaborator. Configuration errors live with the
//! resolver in `nasch-engine`.

use std::error::Error;
use std::fmt;

use crate::cell::{CellValue, Velocity};

/// Errors from seeding a lane with its initial cars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// The rejection sampler hit its draw ceiling before placing every
    /// car. Only reachable when the configuration asks for nearly every
    /// cell to be filled and the ceiling is set unusually low.
    Exhausted {
        /// Cars successfully placed before giving up.
        placed: usize,
        /// Cars requested.
        requested: usize,
        /// Draws performed.
        attempts: u64,
    },
    /// More cars were requested than the lane has cells.
    TooManyCars {
        /// Cars requested.
        requested: usize,
        /// Cells available.
        cells: usize,
    },
    /// The lane passed to the initializer already holds cars.
    LaneNotEmpty {
        /// Number of occupied cells found.
        occupied: usize,
    },
    /// The lane's empty sentinel is also a drawable velocity.
    SentinelInRange {
        /// The lane's sentinel.
        empty: CellValue,
        /// Largest velocity that may be drawn.
        v_max: Velocity,
    },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                placed,
                requested,
                attempts,
            } => write!(
                f,
                "placed {placed} of {requested} cars after {attempts} draws"
            ),
            Self::TooManyCars { requested, cells } => {
                write!(f, "cannot place {requested} cars on {cells} cells")
            }
            Self::LaneNotEmpty { occupied } => {
                write!(f, "lane already holds {occupied} cars")
            }
            Self::SentinelInRange { empty, v_max } => {
                write!(f, "empty sentinel {empty} lies inside [0, {v_max}]")
            }
        }
    }
}

impl Error for InitError {}

/// A violated lane invariant.
///
/// Never produced during normal operation: the update phases preserve
/// every invariant by construction. Checkers return this so tests and
/// debug assertions can report exactly what broke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The number of occupied cells differs from the car population.
    CarCountChanged {
        /// Population the lane was seeded with.
        expected: usize,
        /// Occupied cells found.
        found: usize,
    },
    /// A cell holds a velocity above `v_max`.
    VelocityOutOfRange {
        /// Offending cell index.
        cell: usize,
        /// Velocity found.
        velocity: Velocity,
        /// Configured limit.
        v_max: Velocity,
    },
    /// A cell holds a value that is neither a velocity nor the sentinel.
    CorruptCell {
        /// Offending cell index.
        cell: usize,
        /// Raw value found.
        value: CellValue,
    },
    /// A car's velocity exceeds the free cells ahead of it.
    GapExceeded {
        /// Offending cell index.
        cell: usize,
        /// Velocity found.
        velocity: Velocity,
        /// Free cells ahead.
        gap: Velocity,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CarCountChanged { expected, found } => {
                write!(f, "car count changed: expected {expected}, found {found}")
            }
            Self::VelocityOutOfRange {
                cell,
                velocity,
                v_max,
            } => write!(f, "cell {cell}: velocity {velocity} exceeds v_max {v_max}"),
            Self::CorruptCell { cell, value } => {
                write!(f, "cell {cell}: value {value} is neither a velocity nor empty")
            }
            Self::GapExceeded {
                cell,
                velocity,
                gap,
            } => write!(f, "cell {cell}: velocity {velocity} exceeds gap {gap}"),
        }
    }
}

impl Error for InvariantViolation {}

/// Errors reported by a [`Renderer`](crate::Renderer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The output sink rejected the frame.
    Output {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output { reason } => write!(f, "render output failed: {reason}"),
        }
    }
}

impl Error for RenderError {}
