//! Simulation engine for the Nasch traffic automaton.
//!
//! Resolves configuration, seeds the lane, and runs the four-phase tick
//! either in lockstep ([`LockstepSim`]), under a paced loop with
//! external renderer and clock collaborators ([`run_loop`]), or on a
//! background thread ([`RealtimeSim`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod init;
pub mod lockstep;
pub mod metrics;
pub mod realtime;
pub mod sim_loop;
pub mod tick;

pub use clock::{stop_signal, Limit, SleepClock, StopHandle, StopSignal, Unpaced};
pub use config::{resolve, ConfigError, ConfigValue, RawConfig, SimConfig, SimConfigBuilder};
pub use error::{LoopError, SetupError};
pub use history::{HistoryBuffer, HistoryWindow, WindowSnapshot, MAX_HISTORY_CELLS};
pub use init::{populate, PlacementStrategy};
pub use lockstep::{LockstepSim, StepResult};
pub use metrics::{LoopMetrics, StepMetrics};
pub use realtime::RealtimeSim;
pub use sim_loop::{run_loop, RunReport, StopReason};
pub use tick::TickEngine;
