//! Nasch: the Nagel-Schreckenberg traffic automaton on a circular lane.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Nasch sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use nasch::prelude::*;
//!
//! let config = SimConfig::builder()
//!     .lane_length(1000.0)
//!     .cell_length(7.5)
//!     .density(0.3)
//!     .delay_factor(0.3)
//!     .history(10)
//!     .v_max(5)
//!     .delta_t(0.0)
//!     .empty(-2)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! struct CountFrames(u64);
//!
//! impl Renderer for CountFrames {
//!     fn render(&mut self, _tick: TickId, _stack: &dyn SnapshotStack) -> Result<(), RenderError> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut sim = LockstepSim::new(config).unwrap();
//! let mut frames = CountFrames(0);
//! let report = run_loop(&mut sim, &mut frames, Limit::new(Unpaced, 100)).unwrap();
//! assert_eq!(report.ticks(), 100);
//! assert_eq!(frames.0, 100);
//! assert_eq!(sim.lane().car_count(), 39);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `nasch-core` | Tick ids, cell values, errors, renderer and clock traits |
//! | [`space`] | `nasch-space` | The circular `Lane` and its invariant checkers |
//! | [`phase`] | `nasch-phase` | Phase trait, context, and pipeline validation |
//! | [`phases`] | `nasch-phases` | Accelerate, brake, delay, and drive |
//! | [`engine`] | `nasch-engine` | Configuration, initializer, history, loops, clocks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`nasch-core`).
pub use nasch_core as types;

/// The circular lane (`nasch-space`).
///
/// [`space::Lane`] plus wrap-around arithmetic in [`space::ring`] and
/// the checkers in [`space::invariants`].
pub use nasch_space as space;

/// Phase trait and pipeline validation (`nasch-phase`).
///
/// Implement [`phase::Phase`] to add a custom update rule.
pub use nasch_phase as phase;

/// The four Nagel-Schreckenberg phases (`nasch-phases`).
pub use nasch_phases as phases;

/// Simulation engine (`nasch-engine`).
///
/// [`engine::LockstepSim`] for synchronous stepping,
/// [`engine::run_loop`] for a paced loop, and
/// [`engine::RealtimeSim`] for a background thread.
pub use nasch_engine as engine;

/// Common imports for typical Nasch usage.
///
/// ```rust
/// use nasch::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use nasch_core::{
        CellValue, Clock, Pace, RenderError, Renderer, SnapshotStack, TickId, Velocity,
    };

    // Lane
    pub use nasch_space::Lane;

    // Phases
    pub use nasch_phase::{Phase, PhaseContext, WriteMode};
    pub use nasch_phases::{standard_pipeline, Accelerate, Brake, Delay, Drive};

    // Engine
    pub use nasch_engine::{
        resolve, run_loop, ConfigError, Limit, LockstepSim, PlacementStrategy, RawConfig,
        RealtimeSim, RunReport, SetupError, SimConfig, SleepClock, StepMetrics, StepResult,
        StopReason, Unpaced,
    };
}
