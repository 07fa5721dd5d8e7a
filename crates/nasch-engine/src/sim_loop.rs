//! The paced simulation loop.
//!
//! Each iteration shifts the history, runs the four phases, hands the
//! window to the renderer, then asks the clock to wait out the rest of
//! the tick budget (`delta_t`). The clock is the only suspension point
//! and the only way the loop ends cleanly.

use std::time::{Duration, Instant};

use nasch_core::{Clock, Pace, RenderError, Renderer, TickId};

use crate::error::LoopError;
use crate::lockstep::LockstepSim;
use crate::metrics::LoopMetrics;

/// Why a loop ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The clock returned [`Pace::Stop`].
    Clock,
    /// The renderer failed; the tick itself completed.
    RenderFailed {
        /// Tick whose frame was rejected.
        tick: TickId,
        /// The renderer's error.
        error: RenderError,
    },
}

/// Summary of a finished loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Why the loop ended.
    pub reason: StopReason,
    /// Counters accumulated over the run.
    pub metrics: LoopMetrics,
}

impl RunReport {
    /// Ticks completed during the run.
    pub fn ticks(&self) -> u64 {
        self.metrics.ticks
    }
}

/// Run `sim` until `clock` stops it or `renderer` fails.
///
/// The tick budget is the configured `delta_t`. A tick that takes
/// longer counts as an overrun, and the clock is then offered a zero
/// wait.
///
/// # Errors
///
/// Returns [`LoopError::Step`] if a tick fails to run.
pub fn run_loop<R, C>(
    sim: &mut LockstepSim,
    mut renderer: R,
    mut clock: C,
) -> Result<RunReport, LoopError>
where
    R: Renderer,
    C: Clock,
{
    let budget = sim.config().delta_t();
    let mut metrics = LoopMetrics::default();
    tracing::info!(
        budget_ms = budget.as_millis() as u64,
        start_tick = sim.current_tick().0,
        "simulation loop starting"
    );

    let reason = loop {
        let tick_start = Instant::now();
        let result = sim.step()?;
        metrics.ticks += 1;

        if let Err(error) = renderer.render(result.tick, &result.window) {
            tracing::warn!(tick = result.tick.0, %error, "renderer failed");
            break StopReason::RenderFailed {
                tick: result.tick,
                error,
            };
        }

        let elapsed = tick_start.elapsed();
        let remaining = match budget.checked_sub(elapsed) {
            Some(remaining) => remaining,
            None => {
                if !budget.is_zero() {
                    metrics.overruns += 1;
                    tracing::warn!(
                        tick = result.tick.0,
                        elapsed_us = elapsed.as_micros() as u64,
                        budget_us = budget.as_micros() as u64,
                        "tick overran its budget"
                    );
                }
                Duration::ZERO
            }
        };
        if clock.wait(remaining) == Pace::Stop {
            break StopReason::Clock;
        }
    };

    tracing::info!(
        ticks = metrics.ticks,
        overruns = metrics.overruns,
        reason = ?reason,
        "simulation loop stopped"
    );
    Ok(RunReport { reason, metrics })
}
