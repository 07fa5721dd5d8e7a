//! Core types and traits for the Nasch traffic automaton.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the primitives shared across the workspace: tick identifiers, cell
//! value conventions, error types, and the collaborator traits through
//! which the simulation loop hands snapshots to a renderer and paces
//! itself against a clock.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;
pub mod traits;

pub use cell::{CellValue, Velocity, DEFAULT_EMPTY};
pub use error::{InitError, InvariantViolation, RenderError};
pub use id::TickId;
pub use traits::{Clock, Pace, Renderer, SnapshotStack};
