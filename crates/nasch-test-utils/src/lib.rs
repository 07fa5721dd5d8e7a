//! Test utilities and fixtures for Nasch development.
//!
//! Lane builders, a one-shot phase runner, an in-memory
//! [`SnapshotStack`] and the collaborator doubles in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FailingRenderer, Frame, RecordingRenderer, StopAfter};

use nasch_core::{CellValue, TickId, Velocity, DEFAULT_EMPTY};
use nasch_phase::{execute, Phase};
use nasch_space::invariants::check_lane;
use nasch_space::Lane;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used by [`apply_phase`].
pub const FIXTURE_SEED: u64 = 0x5EED;

/// Build a lane of `len` cells using [`DEFAULT_EMPTY`] with cars at the
/// given `(cell, velocity)` positions.
///
/// Panics on a bad position; test setup errors should fail loudly.
pub fn lane_with(len: usize, cars: &[(usize, Velocity)]) -> Lane {
    Lane::with_cars(len, DEFAULT_EMPTY, cars)
        .unwrap_or_else(|e| panic!("bad fixture lane (len {len}, cars {cars:?}): {e}"))
}

/// Run `phase` once against `current` and return the staged result.
///
/// Uses a fresh [`ChaCha8Rng`] seeded with [`FIXTURE_SEED`] so repeated
/// calls are reproducible.
pub fn apply_phase(phase: &dyn Phase, current: &Lane) -> Lane {
    let mut staging = current.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(FIXTURE_SEED);
    execute(phase, current, &mut staging, &mut rng, TickId(1))
        .unwrap_or_else(|e| panic!("phase '{}' failed: {e}", phase.name()));
    staging
}

/// Assert the between-tick lane invariants, panicking with the violation.
pub fn assert_lane_invariants(lane: &Lane, cars: usize, v_max: Velocity) {
    if let Err(violation) = check_lane(lane, cars, v_max) {
        panic!("lane invariant violated: {violation}\nlane: {:?}", lane.as_slice());
    }
}

/// In-memory [`SnapshotStack`](nasch_core::SnapshotStack), row 0 most recent.
///
/// For renderer tests that do not want a full simulation.
pub struct MockStack {
    rows: Vec<Vec<CellValue>>,
    empty: CellValue,
    v_max: Velocity,
}

impl MockStack {
    pub fn new(rows: Vec<Vec<CellValue>>, empty: CellValue, v_max: Velocity) -> Self {
        Self { rows, empty, v_max }
    }
}

impl nasch_core::SnapshotStack for MockStack {
    fn depth(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    fn empty_value(&self) -> CellValue {
        self.empty
    }

    fn v_max(&self) -> Velocity {
        self.v_max
    }
}
