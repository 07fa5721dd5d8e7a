//! Per-tick and per-run performance metrics.
//!
//! [`StepMetrics`] captures timing and traffic data for a single tick.
//! [`LoopMetrics`] accumulates over a run of the simulation loop.

use smallvec::SmallVec;

/// Timing and traffic metrics collected during a single tick.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Per-phase execution times: `(name, microseconds)`.
    pub phase_us: SmallVec<[(String, u64); 4]>,
    /// Cars that advanced at least one cell.
    pub cars_moved: usize,
    /// Cars that ended the tick at rest.
    pub cars_stopped: usize,
    /// Mean velocity over all cars; 0 on an empty lane.
    pub mean_velocity: f64,
}

/// Counters accumulated over a run of the simulation loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopMetrics {
    /// Ticks completed.
    pub ticks: u64,
    /// Ticks whose work took longer than the pacing interval.
    pub overruns: u64,
}
