//! Lane invariant checkers.
//!
//! These functions verify the properties every lane must satisfy
//! between ticks: a fixed car population, velocities within
//! `[0, v_max]`, and cell values that are either a velocity or the
//! sentinel. [`check_gaps`] additionally verifies the post-brake
//! guarantee that no car is about to drive into another.
//!
//! Reused by the engine's debug assertions and across test modules.

use nasch_core::{InvariantViolation, Velocity};

use crate::lane::Lane;

/// Check that exactly `expected` cells are occupied.
pub fn check_car_count(lane: &Lane, expected: usize) -> Result<(), InvariantViolation> {
    let found = lane.car_count();
    if found != expected {
        return Err(InvariantViolation::CarCountChanged { expected, found });
    }
    Ok(())
}

/// Check that every cell is either the sentinel or a velocity in `[0, v_max]`.
pub fn check_velocity_bounds(lane: &Lane, v_max: Velocity) -> Result<(), InvariantViolation> {
    let empty = lane.empty_value();
    for (cell, &value) in lane.as_slice().iter().enumerate() {
        if value == empty {
            continue;
        }
        if value < 0 {
            return Err(InvariantViolation::CorruptCell { cell, value });
        }
        let velocity = value as Velocity;
        if velocity > v_max {
            return Err(InvariantViolation::VelocityOutOfRange {
                cell,
                velocity,
                v_max,
            });
        }
    }
    Ok(())
}

/// Check that every car's velocity fits the free cells directly ahead.
///
/// Holds after the brake phase and stays true through the delay phase,
/// which only lowers velocities.
pub fn check_gaps(lane: &Lane) -> Result<(), InvariantViolation> {
    for (cell, velocity) in lane.cars() {
        let gap = lane.gap_ahead(cell, velocity);
        if velocity > gap {
            return Err(InvariantViolation::GapExceeded {
                cell,
                velocity,
                gap,
            });
        }
    }
    Ok(())
}

/// Run the between-tick checks: car count and velocity bounds.
pub fn check_lane(lane: &Lane, cars: usize, v_max: Velocity) -> Result<(), InvariantViolation> {
    check_velocity_bounds(lane, v_max)?;
    check_car_count(lane, cars)
}
