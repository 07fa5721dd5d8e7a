//! Execution context passed to phases during tick execution.
//!
//! [`PhaseContext`] splits the lane into a frozen read view (the lane
//! as the previous phase left it) and a mutable staging lane, and
//! carries the injected random source.

use nasch_core::TickId;
use nasch_space::Lane;
use rand::RngCore;

/// Execution context passed to each phase's `apply()` method.
///
/// # Split-borrow semantics
///
/// - **`current()`** is the lane as the phase started. It is borrowed
///   for the context's whole lifetime, so a phase may iterate it while
///   writing to staging.
/// - **`staging()`** is the lane the phase writes. It was seeded by the
///   engine per the phase's [`WriteMode`](crate::WriteMode).
///
/// Randomness is injected through `&mut dyn RngCore` so each caller
/// decides how streams are seeded.
pub struct PhaseContext<'a> {
    current: &'a Lane,
    staging: &'a mut Lane,
    rng: &'a mut dyn RngCore,
    tick_id: TickId,
}

impl<'a> PhaseContext<'a> {
    /// Construct a new phase context.
    ///
    /// Typically called by [`execute`](crate::execute), not by phases.
    pub fn new(
        current: &'a Lane,
        staging: &'a mut Lane,
        rng: &'a mut dyn RngCore,
        tick_id: TickId,
    ) -> Self {
        Self {
            current,
            staging,
            rng,
            tick_id,
        }
    }

    /// The lane as this phase started.
    pub fn current(&self) -> &'a Lane {
        self.current
    }

    /// The lane this phase writes.
    pub fn staging(&mut self) -> &mut Lane {
        self.staging
    }

    /// Random source for stochastic phases.
    pub fn rng(&mut self) -> &mut dyn RngCore {
        self.rng
    }

    /// The tick being computed.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }
}
