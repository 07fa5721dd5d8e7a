//! Engine-level error types.
//!
//! [`SetupError`] covers everything that can stop a simulation from
//! being built. [`LoopError`] covers failures of a running loop.

use std::error::Error;
use std::fmt;

use nasch_core::{InitError, InvariantViolation};
use nasch_phase::PipelineError;
use nasch_space::SpaceError;

use crate::config::ConfigError;

// ── SetupError ─────────────────────────────────────────────────────

/// Errors from building or resetting a simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum SetupError {
    /// The configuration failed to resolve.
    Config(ConfigError),
    /// The lane could not be seeded.
    Init(InitError),
    /// A lane or history buffer could not be allocated.
    Space(SpaceError),
    /// The phase list is malformed.
    Pipeline(PipelineError),
    /// A phase rejected its parameters.
    Phase {
        /// Description of the rejection.
        reason: String,
    },
    /// A supplied starting lane breaks a lane invariant.
    Invariant(InvariantViolation),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Pipeline(e) => write!(f, "pipeline: {e}"),
            Self::Phase { reason } => write!(f, "phase: {reason}"),
            Self::Invariant(e) => write!(f, "starting lane: {e}"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Init(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Pipeline(e) => Some(e),
            Self::Invariant(e) => Some(e),
            Self::Phase { .. } => None,
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<InitError> for SetupError {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

impl From<SpaceError> for SetupError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<PipelineError> for SetupError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<InvariantViolation> for SetupError {
    fn from(e: InvariantViolation) -> Self {
        Self::Invariant(e)
    }
}

// ── LoopError ──────────────────────────────────────────────────────

/// Errors from a running simulation loop.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopError {
    /// A tick failed to run.
    Step(SpaceError),
    /// The background tick thread could not be spawned.
    Spawn {
        /// The OS error message.
        reason: String,
    },
    /// The background tick thread panicked.
    Panicked,
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(e) => write!(f, "tick failed: {e}"),
            Self::Spawn { reason } => write!(f, "failed to spawn tick thread: {reason}"),
            Self::Panicked => write!(f, "tick thread panicked"),
        }
    }
}

impl Error for LoopError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Step(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for LoopError {
    fn from(e: SpaceError) -> Self {
        Self::Step(e)
    }
}
