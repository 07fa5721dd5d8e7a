//! Circular lane storage for the Nasch traffic automaton.
//!
//! This crate defines [`Lane`], the ring of cells the automaton operates
//! on, together with the wrap-around arithmetic it needs and a set of
//! invariant checkers used by tests and debug assertions.
//!
//! A lane of `n` cells is periodic: the cell ahead of `n - 1` is `0`.
//! Each cell stores either a car's velocity or the lane's empty
//! sentinel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod invariants;
pub mod lane;
pub mod ring;

pub use error::SpaceError;
pub use lane::Lane;
