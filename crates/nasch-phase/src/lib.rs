//! Phase trait and execution context for the Nasch traffic automaton.
//!
//! A tick is a fixed sequence of [`Phase`]s. Each phase reads the lane
//! as the previous phase left it and writes a separate staging lane;
//! the engine swaps the two between phases, so no phase ever observes
//! its own partial writes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod phase;
pub mod pipeline;

pub use context::PhaseContext;
pub use phase::{execute, Phase, WriteMode};
pub use pipeline::{validate_pipeline, PhasePlan, PipelineError};
