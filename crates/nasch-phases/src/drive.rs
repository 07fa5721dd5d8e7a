//! Drive phase: every car advances by its velocity.

use nasch_phase::{Phase, PhaseContext, WriteMode};

/// Moves each car `v` cells forward, wrapping around the ring.
///
/// Runs with [`WriteMode::Full`]: the staging lane starts empty and
/// each car is written at its destination, so a car's old cell is
/// cleared without a separate pass. Cars at rest are written back in
/// place.
///
/// Destinations never collide as long as every velocity fits its gap,
/// which the brake phase guarantees: each car stops short of the cell
/// the car ahead occupied when the tick started, and that car only
/// moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Drive;

impl Phase for Drive {
    fn name(&self) -> &str {
        "drive"
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Full
    }

    fn apply(&self, ctx: &mut PhaseContext<'_>) {
        let current = ctx.current();
        for (c, v) in current.cars() {
            let dest = current.ahead(c, v as usize);
            let staging = ctx.staging();
            debug_assert!(
                !staging.is_occupied(dest),
                "drive collision at cell {dest}: car from {c} with velocity {v}"
            );
            staging.set_velocity(dest, v);
        }
    }
}
