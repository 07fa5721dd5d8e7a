//! Lane initializer: seeds an empty lane with its car population.
//!
//! Two strategies place exactly `cars` cars at distinct cells with
//! velocities drawn uniformly from `[0, v_max]`:
//!
//! - [`PlacementStrategy::Rejection`] draws a cell and a velocity and
//!   keeps the pair only if the cell is free, up to a draw ceiling.
//! - [`PlacementStrategy::Shuffle`] shuffles the cell indices and takes
//!   a prefix, so it never redraws.

use nasch_core::cell::is_valid_sentinel;
use nasch_core::{InitError, Velocity};
use nasch_space::Lane;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Floor of the default rejection ceiling.
pub const MIN_ATTEMPTS: u64 = 1024;
/// Draws per cell allowed by the default rejection ceiling.
pub const ATTEMPTS_PER_CELL: u64 = 64;

/// How the initializer chooses car positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Rejection sampling over (cell, velocity) pairs.
    Rejection {
        /// Maximum draws before giving up. `None` uses
        /// [`default_ceiling`] for the lane.
        max_attempts: Option<u64>,
    },
    /// Partial Fisher-Yates shuffle of the cell indices.
    Shuffle,
}

impl Default for PlacementStrategy {
    fn default() -> Self {
        Self::Rejection { max_attempts: None }
    }
}

/// `max(MIN_ATTEMPTS, ATTEMPTS_PER_CELL * cells)`.
pub fn default_ceiling(cells: usize) -> u64 {
    (cells as u64)
        .saturating_mul(ATTEMPTS_PER_CELL)
        .max(MIN_ATTEMPTS)
}

/// Place `cars` cars on the empty `lane`.
///
/// On success exactly `cars` cells are occupied, each with a velocity
/// in `[0, v_max]`. On error the lane may hold a partial population.
///
/// # Errors
///
/// - [`InitError::TooManyCars`] if `cars > lane.len()`
/// - [`InitError::LaneNotEmpty`] if the lane already holds cars
/// - [`InitError::SentinelInRange`] if the sentinel is a drawable velocity
/// - [`InitError::Exhausted`] if rejection sampling hits its ceiling
pub fn populate(
    lane: &mut Lane,
    cars: usize,
    v_max: Velocity,
    strategy: PlacementStrategy,
    rng: &mut dyn RngCore,
) -> Result<(), InitError> {
    if cars > lane.len() {
        return Err(InitError::TooManyCars {
            requested: cars,
            cells: lane.len(),
        });
    }
    let occupied = lane.car_count();
    if occupied != 0 {
        return Err(InitError::LaneNotEmpty { occupied });
    }
    if !is_valid_sentinel(lane.empty_value(), v_max) {
        return Err(InitError::SentinelInRange {
            empty: lane.empty_value(),
            v_max,
        });
    }

    match strategy {
        PlacementStrategy::Rejection { max_attempts } => {
            let ceiling = max_attempts.unwrap_or_else(|| default_ceiling(lane.len()));
            rejection(lane, cars, v_max, ceiling, rng)
        }
        PlacementStrategy::Shuffle => {
            shuffle(lane, cars, v_max, rng);
            Ok(())
        }
    }
}

fn rejection(
    lane: &mut Lane,
    cars: usize,
    v_max: Velocity,
    ceiling: u64,
    rng: &mut dyn RngCore,
) -> Result<(), InitError> {
    let len = lane.len();
    let mut placed = 0;
    let mut attempts = 0u64;
    while placed < cars {
        if attempts == ceiling {
            return Err(InitError::Exhausted {
                placed,
                requested: cars,
                attempts,
            });
        }
        attempts += 1;
        let cell = rng.random_range(0..len);
        let velocity = rng.random_range(0..=v_max);
        if !lane.is_occupied(cell) {
            lane.set_velocity(cell, velocity);
            placed += 1;
        }
    }
    tracing::debug!(cars, attempts, "placed cars by rejection sampling");
    Ok(())
}

fn shuffle(lane: &mut Lane, cars: usize, v_max: Velocity, rng: &mut dyn RngCore) {
    let mut cells: Vec<usize> = (0..lane.len()).collect();
    let (chosen, _) = cells.partial_shuffle(rng, cars);
    for &cell in chosen.iter() {
        let velocity = rng.random_range(0..=v_max);
        lane.set_velocity(cell, velocity);
    }
    tracing::debug!(cars, "placed cars by shuffle");
}
