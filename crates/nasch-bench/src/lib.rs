//! Benchmark profiles for the Nasch traffic automaton.
//!
//! - [`reference_profile`]: the classic 1 km ring (133 cells)
//! - [`stress_profile`]: a 100K-cell ring, a quarter full
//! - [`density_profile`]: a 10K-cell ring at a chosen density

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use nasch_engine::SimConfig;

/// Cells in the stress profile.
pub const STRESS_CELLS: usize = 100_000;

/// Cells in the density sweep profiles.
pub const SWEEP_CELLS: usize = 10_000;

/// The classic setup: 1000 m of road in 7.5 m cells, 30% full,
/// `v_max = 5`, `p = 0.3`, ten rows of history.
pub fn reference_profile(seed: u64) -> SimConfig {
    SimConfig::builder()
        .lane_length(1000.0)
        .cell_length(7.5)
        .density(0.3)
        .delay_factor(0.3)
        .history(10)
        .v_max(5)
        .delta_t(0.0)
        .empty(-2)
        .seed(seed)
        .build()
        .expect("reference profile is valid")
}

/// [`STRESS_CELLS`] cells at 25% density, otherwise as [`reference_profile`].
pub fn stress_profile(seed: u64) -> SimConfig {
    density_sized(STRESS_CELLS, 0.25, seed)
}

/// A [`SWEEP_CELLS`]-cell ring filled to `density`.
pub fn density_profile(density: f64, seed: u64) -> SimConfig {
    density_sized(SWEEP_CELLS, density, seed)
}

fn density_sized(cells: usize, density: f64, seed: u64) -> SimConfig {
    SimConfig::builder()
        .lane_length(cells as f64)
        .cell_length(1.0)
        .density(density)
        .delay_factor(0.3)
        .history(10)
        .v_max(5)
        .delta_t(0.0)
        .empty(-2)
        .seed(seed)
        .build()
        .expect("sized profile is valid")
}

/// Budget used by the profiles: unpaced.
pub const PROFILE_DELTA_T: Duration = Duration::ZERO;
