//! Accelerate phase: every car speeds up by one, capped at `v_max`.

use nasch_core::Velocity;
use nasch_phase::{Phase, PhaseContext};

/// Raises each car's velocity by one cell per tick, up to `v_max`.
///
/// Purely local: a car's new velocity depends only on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accelerate {
    v_max: Velocity,
}

impl Accelerate {
    /// Create an accelerate phase with the given speed limit.
    pub fn new(v_max: Velocity) -> Self {
        Self { v_max }
    }

    /// The speed limit.
    pub fn v_max(&self) -> Velocity {
        self.v_max
    }
}

impl Phase for Accelerate {
    fn name(&self) -> &str {
        "accelerate"
    }

    fn apply(&self, ctx: &mut PhaseContext<'_>) {
        for (c, v) in ctx.current().cars() {
            ctx.staging().set_velocity(c, v.saturating_add(1).min(self.v_max));
        }
    }
}
