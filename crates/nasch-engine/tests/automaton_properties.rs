//! Property tests: the automaton's invariants over random lanes and
//! configurations.

use std::collections::BTreeMap;

use nasch_core::{Velocity, DEFAULT_EMPTY};
use nasch_engine::{LockstepSim, PlacementStrategy, SimConfig, TickEngine};
use nasch_phases::{standard_pipeline, Accelerate, Brake};
use nasch_space::invariants::{check_gaps, check_lane};
use nasch_space::Lane;
use nasch_test_utils::{apply_phase, lane_with};
use proptest::prelude::*;

/// A lane of `len` cells with cars at distinct positions, velocities
/// in `[0, v_max]`.
fn arb_lane(max_len: usize, v_max: Velocity) -> impl Strategy<Value = Lane> {
    (v_max as usize + 1..max_len).prop_flat_map(move |len| {
        prop::collection::btree_map(0..len, 0..=v_max, 0..=len).prop_map(
            move |cars: BTreeMap<usize, Velocity>| {
                let cars: Vec<(usize, Velocity)> = cars.into_iter().collect();
                lane_with(len, &cars)
            },
        )
    })
}

fn config_for(lane: &Lane, v_max: Velocity, delay: f64, seed: u64) -> SimConfig {
    SimConfig::builder()
        .lane_length(lane.len() as f64)
        .cell_length(1.0)
        .density(0.0)
        .num_cars(lane.car_count() as i64)
        .delay_factor(delay)
        .history(2)
        .v_max(i64::from(v_max))
        .delta_t(0.0)
        .empty(i64::from(DEFAULT_EMPTY))
        .seed(seed)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn population_and_bounds_hold_every_tick(
        lane in arb_lane(80, 5),
        delay in 0.0f64..=1.0,
        seed in any::<u64>(),
        ticks in 1usize..60,
    ) {
        let cars = lane.car_count();
        let mut sim = LockstepSim::from_lane(config_for(&lane, 5, delay, seed), &lane).unwrap();
        for _ in 0..ticks {
            sim.step().unwrap();
            prop_assert_eq!(check_lane(sim.lane(), cars, 5), Ok(()));
        }
    }

    #[test]
    fn no_two_cars_share_a_destination(lane in arb_lane(60, 4), seed in any::<u64>()) {
        // A collision would overwrite one car with another, so the
        // population would drop.
        let mut engine = TickEngine::new(
            standard_pipeline(4, 0.5).unwrap(),
            lane.len(),
            DEFAULT_EMPTY,
            seed,
        ).unwrap();
        let mut current = lane.clone();
        for tick in 1..20u64 {
            engine.advance(&mut current, tick.into()).unwrap();
            prop_assert_eq!(current.car_count(), lane.car_count());
        }
    }

    #[test]
    fn brake_leaves_room_for_every_car(lane in arb_lane(60, 5)) {
        let accelerated = apply_phase(&Accelerate::new(5), &lane);
        let braked = apply_phase(&Brake, &accelerated);
        prop_assert_eq!(check_gaps(&braked), Ok(()));
        for (cell, v) in braked.cars() {
            prop_assert!(v <= accelerated.velocity(cell).unwrap());
        }
    }

    #[test]
    fn zero_delay_ignores_seed(lane in arb_lane(50, 5), a in any::<u64>(), b in any::<u64>()) {
        let mut first = LockstepSim::from_lane(config_for(&lane, 5, 0.0, a), &lane).unwrap();
        let mut second = LockstepSim::from_lane(config_for(&lane, 5, 0.0, b), &lane).unwrap();
        for _ in 0..25 {
            first.step().unwrap();
            second.step().unwrap();
            prop_assert_eq!(first.lane(), second.lane());
        }
    }

    #[test]
    fn empty_lane_stays_empty(len in 2usize..100, delay in 0.0f64..=1.0, seed in any::<u64>()) {
        let empty = lane_with(len, &[]);
        let mut engine = TickEngine::new(
            standard_pipeline(1, delay).unwrap(),
            len,
            DEFAULT_EMPTY,
            seed,
        ).unwrap();
        let mut current = empty.clone();
        engine.advance(&mut current, 1u64.into()).unwrap();
        prop_assert_eq!(current, empty);
    }

    #[test]
    fn seeded_runs_are_reproducible(
        density in 0.0f64..=1.0,
        delay in 0.0f64..=1.0,
        seed in any::<u64>(),
        shuffle in any::<bool>(),
    ) {
        let strategy = if shuffle { PlacementStrategy::Shuffle } else { PlacementStrategy::default() };
        let config = SimConfig::builder()
            .lane_length(64.0)
            .cell_length(1.0)
            .density(density)
            .delay_factor(delay)
            .history(3)
            .v_max(5)
            .delta_t(0.0)
            .empty(-1)
            .build()
            .unwrap()
            .with_seed(seed);
        let mut a = LockstepSim::with_strategy(config.clone(), strategy).unwrap();
        let mut b = LockstepSim::with_strategy(config, strategy).unwrap();
        for _ in 0..20 {
            a.step().unwrap();
            b.step().unwrap();
        }
        prop_assert_eq!(a.history(), b.history());
    }
}
