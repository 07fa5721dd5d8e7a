//! Lockstep (synchronous) simulation.
//!
//! [`LockstepSim`] owns the history buffer and the tick engine. Each
//! [`step()`](LockstepSim::step) call shifts the history, advances the
//! newest row by one tick, and returns a view of the whole window.
//!
//! # Ownership model
//!
//! `LockstepSim` is [`Send`] but not [`Sync`]. [`StepResult`] borrows
//! from the simulation, so the caller cannot step again while holding
//! a window.

use nasch_core::TickId;
use nasch_space::invariants::check_lane;
use nasch_space::{Lane, SpaceError};

use crate::config::SimConfig;
use crate::error::SetupError;
use crate::history::{HistoryBuffer, HistoryWindow};
use crate::init::{populate, PlacementStrategy};
use crate::metrics::StepMetrics;
use crate::tick::{stream_rng, TickEngine, PLACEMENT_STREAM};

// Compile-time assertion: LockstepSim is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LockstepSim>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`LockstepSim::step()`] call.
#[derive(Debug)]
pub struct StepResult<'s> {
    /// The tick just completed.
    pub tick: TickId,
    /// The history window, newest row produced by `tick`.
    pub window: HistoryWindow<'s>,
    /// Performance metrics for this tick.
    pub metrics: StepMetrics,
}

// ── LockstepSim ─────────────────────────────────────────────────

/// Single-threaded traffic simulation.
///
/// # Example
///
/// ```
/// use nasch_engine::{LockstepSim, SimConfig};
///
/// let config = SimConfig::builder()
///     .lane_length(100.0)
///     .cell_length(1.0)
///     .density(0.2)
///     .delay_factor(0.3)
///     .history(4)
///     .v_max(5)
///     .delta_t(0.0)
///     .empty(-2)
///     .build()
///     .unwrap();
/// let mut sim = LockstepSim::new(config).unwrap();
/// for _ in 0..10 {
///     sim.step().unwrap();
/// }
/// assert_eq!(sim.lane().car_count(), 20);
/// ```
pub struct LockstepSim {
    config: SimConfig,
    strategy: PlacementStrategy,
    history: HistoryBuffer,
    engine: TickEngine,
    current_tick: TickId,
    last_metrics: StepMetrics,
}

impl LockstepSim {
    /// Build a simulation with the default placement strategy.
    pub fn new(config: SimConfig) -> Result<Self, SetupError> {
        Self::with_strategy(config, PlacementStrategy::default())
    }

    /// Build a simulation, seeding the lane with `strategy`.
    pub fn with_strategy(
        config: SimConfig,
        strategy: PlacementStrategy,
    ) -> Result<Self, SetupError> {
        let mut sim = Self::empty(config, strategy)?;
        sim.seed_lane()?;
        sim.log_ready();
        Ok(sim)
    }

    /// Build a simulation starting from a given lane instead of a
    /// random placement.
    ///
    /// The lane must have `num_cells` cells holding exactly `num_cars`
    /// cars with velocities in `[0, v_max]`. Its sentinel may differ
    /// from the configured one.
    pub fn from_lane(config: SimConfig, lane: &Lane) -> Result<Self, SetupError> {
        let mut sim = Self::empty(config, PlacementStrategy::default())?;
        if lane.len() != sim.config.num_cells() {
            return Err(SpaceError::LengthMismatch {
                expected: sim.config.num_cells(),
                found: lane.len(),
            }
            .into());
        }
        let current = sim.history.current_mut();
        for (cell, velocity) in lane.cars() {
            current.place(cell, velocity)?;
        }
        check_lane(current, sim.config.num_cars(), sim.config.v_max())?;
        sim.log_ready();
        Ok(sim)
    }

    fn empty(config: SimConfig, strategy: PlacementStrategy) -> Result<Self, SetupError> {
        let history = HistoryBuffer::new(
            config.history(),
            config.num_cells(),
            config.empty(),
            config.v_max(),
        )?;
        let engine = TickEngine::from_config(&config)?;
        Ok(Self {
            config,
            strategy,
            history,
            engine,
            current_tick: TickId(0),
            last_metrics: StepMetrics::default(),
        })
    }

    fn seed_lane(&mut self) -> Result<(), SetupError> {
        let mut rng = stream_rng(self.config.seed(), PLACEMENT_STREAM);
        populate(
            self.history.current_mut(),
            self.config.num_cars(),
            self.config.v_max(),
            self.strategy,
            &mut rng,
        )?;
        Ok(())
    }

    fn log_ready(&self) {
        tracing::info!(
            cells = self.config.num_cells(),
            cars = self.config.num_cars(),
            v_max = self.config.v_max(),
            delay_factor = self.config.delay_factor(),
            history = self.config.history(),
            seed = self.config.seed(),
            "simulation ready"
        );
    }

    /// Run one tick: shift the history, then advance the newest row.
    pub fn step(&mut self) -> Result<StepResult<'_>, SpaceError> {
        let tick = self.current_tick.next();
        self.history.shift();
        let metrics = self.engine.advance(self.history.current_mut(), tick)?;
        self.current_tick = tick;
        self.last_metrics = metrics.clone();
        tracing::debug!(
            tick = tick.0,
            moving = metrics.cars_moved,
            mean_velocity = metrics.mean_velocity,
            total_us = metrics.total_us,
            "tick complete"
        );
        Ok(StepResult {
            tick,
            window: self.history.window(),
            metrics,
        })
    }

    /// Restart from tick 0 with a fresh placement drawn from `seed`.
    pub fn reset(&mut self, seed: u64) -> Result<(), SetupError> {
        self.config = self.config.clone().with_seed(seed);
        self.engine.set_seed(seed);
        self.history.clear();
        self.current_tick = TickId(0);
        self.last_metrics = StepMetrics::default();
        self.seed_lane()?;
        tracing::info!(seed, "simulation reset");
        Ok(())
    }

    /// The history buffer, row 0 most recent.
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// The current lane.
    pub fn lane(&self) -> &Lane {
        self.history.current()
    }

    /// The resolved configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Last completed tick (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The current seed.
    pub fn seed(&self) -> u64 {
        self.config.seed()
    }
}

impl std::fmt::Debug for LockstepSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockstepSim")
            .field("current_tick", &self.current_tick)
            .field("cells", &self.config.num_cells())
            .field("cars", &self.config.num_cars())
            .field("seed", &self.config.seed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use nasch_core::SnapshotStack;
    use nasch_test_utils::{assert_lane_invariants, lane_with};

    fn config(cells: f64, density: f64, delay: f64, history: i64) -> SimConfig {
        SimConfig::builder()
            .lane_length(cells)
            .cell_length(1.0)
            .density(density)
            .delay_factor(delay)
            .history(history)
            .v_max(5)
            .delta_t(0.0)
            .empty(-2)
            .seed(3)
            .build()
            .unwrap()
    }

    // ── Construction ───────────────────────────────────────────────

    #[test]
    fn new_seeds_configured_population() {
        let sim = LockstepSim::new(config(50.0, 0.4, 0.3, 3)).unwrap();
        assert_lane_invariants(sim.lane(), 20, 5);
        assert_eq!(sim.current_tick(), TickId(0));
        // Older rows start empty.
        assert_eq!(sim.history().get(1).unwrap().car_count(), 0);
    }

    #[test]
    fn unbounded_history_never_reaches_allocation() {
        let err = SimConfig::builder()
            .lane_length(50.0)
            .cell_length(1.0)
            .density(0.4)
            .delay_factor(0.3)
            .history(i64::MAX)
            .v_max(5)
            .delta_t(0.0)
            .empty(-2)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::HistoryTooLarge { cells: 50, .. }));
    }

    #[test]
    fn shuffle_strategy_seeds_population() {
        let sim =
            LockstepSim::with_strategy(config(50.0, 0.4, 0.3, 3), PlacementStrategy::Shuffle)
                .unwrap();
        assert_lane_invariants(sim.lane(), 20, 5);
    }

    #[test]
    fn from_lane_rejects_wrong_length() {
        let lane = lane_with(9, &[]);
        let err = LockstepSim::from_lane(config(10.0, 0.0, 0.0, 2), &lane).unwrap_err();
        assert!(matches!(
            err,
            SetupError::Space(SpaceError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn from_lane_rejects_wrong_population() {
        let lane = lane_with(10, &[(0, 1)]);
        let err = LockstepSim::from_lane(config(10.0, 0.0, 0.0, 2), &lane).unwrap_err();
        assert!(matches!(err, SetupError::Invariant(_)));
    }

    #[test]
    fn from_lane_translates_sentinel() {
        let lane = Lane::with_cars(10, 99, &[(4, 2)]).unwrap();
        let sim = LockstepSim::from_lane(config(10.0, 0.1, 0.0, 2), &lane).unwrap();
        assert_eq!(sim.lane().empty_value(), -2);
        assert_eq!(sim.lane().velocity(4), Some(2));
    }

    // ── Stepping ───────────────────────────────────────────────────

    #[test]
    fn step_advances_tick_and_history() {
        let lane = lane_with(10, &[(0, 2), (5, 0)]);
        let mut sim = LockstepSim::from_lane(config(10.0, 0.2, 0.0, 3), &lane).unwrap();
        let result = sim.step().unwrap();
        assert_eq!(result.tick, TickId(1));
        assert_eq!(result.window.row(0).unwrap()[3], 3);
        assert_eq!(result.window.row(1).unwrap()[0], 2);
        assert!(result.window.row(2).unwrap().iter().all(|&c| c == -2));
        assert_eq!(sim.last_metrics().cars_moved, 2);
    }

    #[test]
    fn population_conserved_over_many_ticks() {
        let mut sim = LockstepSim::new(config(200.0, 0.35, 0.3, 5)).unwrap();
        for _ in 0..200 {
            sim.step().unwrap();
            assert_lane_invariants(sim.lane(), 70, 5);
        }
        assert_eq!(sim.current_tick(), TickId(200));
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut sim = LockstepSim::new(config(100.0, 0.3, 0.4, 2)).unwrap();
            for _ in 0..50 {
                sim.step().unwrap();
            }
            sim.lane().clone()
        };
        assert_eq!(run(), run());
    }

    // ── Reset ──────────────────────────────────────────────────────

    #[test]
    fn reset_restarts_from_tick_zero() {
        let mut sim = LockstepSim::new(config(100.0, 0.3, 0.4, 3)).unwrap();
        for _ in 0..5 {
            sim.step().unwrap();
        }
        sim.reset(3).unwrap();
        let fresh = LockstepSim::new(config(100.0, 0.3, 0.4, 3)).unwrap();
        assert_eq!(sim.current_tick(), TickId(0));
        assert_eq!(sim.lane(), fresh.lane());
        assert_eq!(sim.history(), fresh.history());
    }

    #[test]
    fn reset_with_new_seed_changes_seed() {
        let mut sim = LockstepSim::new(config(100.0, 0.3, 0.4, 3)).unwrap();
        sim.reset(11).unwrap();
        assert_eq!(sim.seed(), 11);
        assert_lane_invariants(sim.lane(), 30, 5);
    }
}
