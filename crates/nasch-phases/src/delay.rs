//! Delay phase: random hesitation of moving cars.
//!
//! Each moving car independently slows by one with a configured
//! probability, modelling reaction time and uneven driving. Cars at
//! rest are never touched, so no velocity drops below zero.
//!
//! One uniform draw in `[0, 1)` is taken per moving car, in cell order,
//! from the context's random source. A fixed source therefore yields a
//! fixed outcome.
//!
//! Constructed via the builder pattern: [`Delay::builder`].

use nasch_phase::{Phase, PhaseContext};
use rand::Rng;

/// Slows each moving car by one with probability `probability`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Delay {
    probability: f64,
}

/// Builder for [`Delay`].
///
/// Required field: `probability`.
pub struct DelayBuilder {
    probability: Option<f64>,
}

impl Delay {
    /// Create a new builder for configuring a `Delay` phase.
    pub fn builder() -> DelayBuilder {
        DelayBuilder { probability: None }
    }

    /// The per-car slowdown probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl DelayBuilder {
    /// Set the per-car slowdown probability. Must lie in `[0, 1]`.
    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Build the phase, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `probability` is not set
    /// - `probability` is NaN or outside `[0, 1]`
    pub fn build(self) -> Result<Delay, String> {
        let probability = self
            .probability
            .ok_or_else(|| "probability is required".to_string())?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(format!(
                "probability must lie in [0, 1], got {probability}"
            ));
        }
        Ok(Delay { probability })
    }
}

impl Phase for Delay {
    fn name(&self) -> &str {
        "delay"
    }

    fn apply(&self, ctx: &mut PhaseContext<'_>) {
        if self.probability == 0.0 {
            return;
        }
        for (c, v) in ctx.current().cars() {
            if v == 0 {
                continue;
            }
            let roll: f64 = ctx.rng().random();
            if roll < self.probability {
                ctx.staging().set_velocity(c, v - 1);
            }
        }
    }
}
