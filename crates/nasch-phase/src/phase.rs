//! The [`Phase`] trait and [`WriteMode`] enum.
//!
//! Phases are stateless operators executed in sequence each tick. Each
//! declares how its staging lane is initialised, and the engine seeds
//! the buffer accordingly before calling [`Phase::apply`].

use nasch_core::TickId;
use nasch_space::{Lane, SpaceError};
use rand::RngCore;

use crate::context::PhaseContext;

/// Staging-lane initialisation strategy for a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Staging starts all-empty. The phase must write every car it
    /// wants to keep.
    ///
    /// Used by phases that move cars (drive).
    Full,

    /// Staging starts as a copy of the current lane. The phase
    /// rewrites only the cells it changes.
    ///
    /// Used by phases that adjust velocities in place.
    Incremental,
}

/// A modular, stateless step of the per-tick update.
///
/// # Contract
///
/// - `apply()` reads only `ctx.current()` and writes only `ctx.staging()`.
///   Every cell of the result is therefore a function of the lane as
///   the phase started, never of another cell's new value.
/// - `&self`: phases carry configuration, not state. Randomness comes
///   from `ctx.rng()`.
/// - A phase must not change the number of cars.
///
/// # Examples
///
/// A phase that halts every car:
///
/// ```
/// use nasch_phase::{Phase, PhaseContext};
///
/// struct Halt;
///
/// impl Phase for Halt {
///     fn name(&self) -> &str { "halt" }
///
///     fn apply(&self, ctx: &mut PhaseContext<'_>) {
///         let cars: Vec<usize> = ctx.current().cars().map(|(c, _)| c).collect();
///         for c in cars {
///             ctx.staging().set_velocity(c, 0);
///         }
///     }
/// }
///
/// assert_eq!(Halt.name(), "halt");
/// ```
pub trait Phase: Send + 'static {
    /// Human-readable name for logging and metrics.
    fn name(&self) -> &str;

    /// How the engine seeds the staging lane before [`apply`](Phase::apply).
    ///
    /// Default: [`WriteMode::Incremental`].
    fn write_mode(&self) -> WriteMode {
        WriteMode::Incremental
    }

    /// Execute the phase once.
    fn apply(&self, ctx: &mut PhaseContext<'_>);
}

/// Seed `staging` per the phase's [`WriteMode`] and apply the phase.
///
/// `current` is left untouched; the caller commits by swapping
/// `current` and `staging`.
///
/// Returns `Err(SpaceError::LengthMismatch)` if the two lanes differ in
/// length.
pub fn execute(
    phase: &dyn Phase,
    current: &Lane,
    staging: &mut Lane,
    rng: &mut dyn RngCore,
    tick_id: TickId,
) -> Result<(), SpaceError> {
    match phase.write_mode() {
        WriteMode::Incremental => staging.copy_from(current)?,
        WriteMode::Full => {
            if staging.len() != current.len() {
                return Err(SpaceError::LengthMismatch {
                    expected: current.len(),
                    found: staging.len(),
                });
            }
            staging.clear_all();
        }
    }
    let mut ctx = PhaseContext::new(current, staging, rng, tick_id);
    phase.apply(&mut ctx);
    Ok(())
}
