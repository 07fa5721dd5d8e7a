//! Pipeline validation.
//!
//! [`validate_pipeline`] runs once at engine startup to check the phase
//! list for structural errors and record each phase's [`WriteMode`],
//! so the per-tick loop never re-queries the trait objects.

use indexmap::IndexSet;

use crate::phase::{Phase, WriteMode};

use std::error::Error;
use std::fmt;

// ── Plan ───────────────────────────────────────────────────────────

/// Validated phase order with each phase's staging strategy.
#[derive(Debug)]
#[must_use]
pub struct PhasePlan {
    names: IndexSet<String>,
    write_modes: Vec<WriteMode>,
}

impl PhasePlan {
    /// Number of phases in the plan.
    pub fn len(&self) -> usize {
        self.write_modes.len()
    }

    /// Whether the plan covers zero phases.
    pub fn is_empty(&self) -> bool {
        self.write_modes.is_empty()
    }

    /// Phase names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Write mode of the phase at `index`.
    pub fn write_mode(&self, index: usize) -> Option<WriteMode> {
        self.write_modes.get(index).copied()
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from pipeline validation (startup-time, not per-tick).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No phases registered.
    EmptyPipeline,
    /// Two phases share a name, making metrics ambiguous.
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "pipeline has no phases"),
            Self::DuplicateName { name } => write!(f, "duplicate phase name '{name}'"),
        }
    }
}

impl Error for PipelineError {}

// ── Validation ─────────────────────────────────────────────────────

/// Validate a phase list and build its [`PhasePlan`].
pub fn validate_pipeline(phases: &[Box<dyn Phase>]) -> Result<PhasePlan, PipelineError> {
    if phases.is_empty() {
        return Err(PipelineError::EmptyPipeline);
    }
    let mut names = IndexSet::with_capacity(phases.len());
    let mut write_modes = Vec::with_capacity(phases.len());
    for phase in phases {
        if !names.insert(phase.name().to_string()) {
            return Err(PipelineError::DuplicateName {
                name: phase.name().to_string(),
            });
        }
        write_modes.push(phase.write_mode());
    }
    Ok(PhasePlan { names, write_modes })
}
