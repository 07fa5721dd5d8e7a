//! Brake phase: no car may drive into the car ahead.

use nasch_phase::{Phase, PhaseContext};

/// Lowers each car's velocity to the number of free cells directly
/// ahead of it: `v = min(v, gap)`.
///
/// The gap probe looks at most `v` cells ahead and stops at the first
/// occupied cell. Gaps are measured on the lane as the phase started,
/// so the result does not depend on iteration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Brake;

impl Phase for Brake {
    fn name(&self) -> &str {
        "brake"
    }

    fn apply(&self, ctx: &mut PhaseContext<'_>) {
        let current = ctx.current();
        for (c, v) in current.cars() {
            let gap = current.gap_ahead(c, v);
            if gap < v {
                ctx.staging().set_velocity(c, gap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nasch_space::invariants::check_gaps;
    use nasch_test_utils::{apply_phase, lane_with};
    use proptest::prelude::*;

    #[test]
    fn free_road_keeps_velocity() {
        let lane = lane_with(10, &[(0, 3), (5, 1)]);
        let out = apply_phase(&Brake, &lane);
        assert_eq!(out.velocity(0), Some(3));
        assert_eq!(out.velocity(5), Some(1));
    }

    #[test]
    fn slows_to_gap() {
        let lane = lane_with(10, &[(0, 5), (3, 0)]);
        let out = apply_phase(&Brake, &lane);
        assert_eq!(out.velocity(0), Some(2));
        assert_eq!(out.velocity(3), Some(0));
    }

    #[test]
    fn bumper_to_bumper_stops() {
        let lane = lane_with(5, &[(1, 2), (2, 2)]);
        let out = apply_phase(&Brake, &lane);
        assert_eq!(out.velocity(1), Some(0));
        assert_eq!(out.velocity(2), Some(2));
    }

    #[test]
    fn gap_wraps_around_ring() {
        let lane = lane_with(10, &[(8, 4), (1, 0)]);
        let out = apply_phase(&Brake, &lane);
        assert_eq!(out.velocity(8), Some(2));
    }

    #[test]
    fn measures_against_phase_start_not_new_values() {
        // Car at 0 is braked to 0 by the car at 1; the car at 1 must
        // still see the car at 2 as occupied, and vice versa around
        // the ring, regardless of which is processed first.
        let lane = lane_with(3, &[(0, 2), (1, 2), (2, 2)]);
        let out = apply_phase(&Brake, &lane);
        assert_eq!(out.cars().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (2, 0)]);
    }

    proptest! {
        #[test]
        fn post_brake_gaps_hold(
            len in 2usize..40,
            cars in proptest::collection::btree_map(0usize..40, 0u32..10, 1..15),
        ) {
            let cars: Vec<(usize, u32)> = cars.into_iter().filter(|&(p, _)| p < len).collect();
            let lane = lane_with(len, &cars);
            let out = apply_phase(&Brake, &lane);
            prop_assert_eq!(check_gaps(&out), Ok(()));
            prop_assert_eq!(out.car_count(), lane.car_count());
            for (c, v) in out.cars() {
                prop_assert!(v <= lane.velocity(c).unwrap());
            }
        }
    }
}
