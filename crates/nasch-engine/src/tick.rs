//! Tick engine: runs the phase pipeline over one lane.
//!
//! [`TickEngine`] owns the phases and a staging lane. Each phase reads
//! the lane as the previous phase left it and writes the staging lane,
//! then the two are swapped, so every phase sees a consistent snapshot.

use std::time::Instant;

use nasch_core::{CellValue, TickId};
use nasch_phase::{execute, validate_pipeline, Phase, PhasePlan};
use nasch_phases::standard_pipeline;
use nasch_space::{Lane, SpaceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::error::SetupError;
use crate::metrics::StepMetrics;

/// Stream reserved for initial placement. Tick `n` draws from stream `n`,
/// and ticks start at 1.
pub const PLACEMENT_STREAM: u64 = 0;

/// A ChaCha8 generator for `stream` of `seed`.
///
/// Streams of one seed are independent, so placement and each tick's
/// delay draws are reproducible on their own.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Runs a validated phase pipeline with double buffering.
pub struct TickEngine {
    phases: Vec<Box<dyn Phase>>,
    plan: PhasePlan,
    staging: Lane,
    seed: u64,
}

impl TickEngine {
    /// Build an engine for lanes of `cells` cells.
    pub fn new(
        phases: Vec<Box<dyn Phase>>,
        cells: usize,
        empty: CellValue,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let plan = validate_pipeline(&phases)?;
        Ok(Self {
            phases,
            plan,
            staging: Lane::new(cells, empty)?,
            seed,
        })
    }

    /// Build the standard accelerate, brake, delay, drive engine.
    pub fn from_config(config: &SimConfig) -> Result<Self, SetupError> {
        let phases = standard_pipeline(config.v_max(), config.delay_factor())
            .map_err(|reason| SetupError::Phase { reason })?;
        Self::new(phases, config.num_cells(), config.empty(), config.seed())
    }

    /// Advance `lane` by one tick.
    ///
    /// Returns `Err(SpaceError::LengthMismatch)` if `lane` is not the
    /// length this engine was built for.
    pub fn advance(&mut self, lane: &mut Lane, tick: TickId) -> Result<StepMetrics, SpaceError> {
        let tick_start = Instant::now();
        let mut rng = stream_rng(self.seed, tick.0);
        #[cfg(debug_assertions)]
        let cars_before = lane.car_count();

        let mut phase_us = smallvec::SmallVec::new();
        for (phase, name) in self.phases.iter().zip(self.plan.names()) {
            let phase_start = Instant::now();
            execute(phase.as_ref(), lane, &mut self.staging, &mut rng, tick)?;
            std::mem::swap(lane, &mut self.staging);
            phase_us.push((name.to_string(), phase_start.elapsed().as_micros() as u64));
        }

        #[cfg(debug_assertions)]
        debug_assert_eq!(
            lane.car_count(),
            cars_before,
            "tick {tick} changed the car population"
        );

        let mut cars = 0usize;
        let mut cars_moved = 0usize;
        let mut velocity_sum = 0u64;
        for (_, v) in lane.cars() {
            cars += 1;
            if v > 0 {
                cars_moved += 1;
            }
            velocity_sum += u64::from(v);
        }
        let mean_velocity = if cars == 0 {
            0.0
        } else {
            velocity_sum as f64 / cars as f64
        };

        Ok(StepMetrics {
            total_us: tick_start.elapsed().as_micros() as u64,
            phase_us,
            cars_moved,
            cars_stopped: cars - cars_moved,
            mean_velocity,
        })
    }

    /// Replace the seed used for subsequent ticks.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Seed of the per-tick streams.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The validated phase order.
    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }
}

impl std::fmt::Debug for TickEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickEngine")
            .field("phases", &self.plan.names().collect::<Vec<_>>())
            .field("cells", &self.staging.len())
            .field("seed", &self.seed)
            .finish()
    }
}
