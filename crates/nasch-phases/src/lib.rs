//! The four phases of the Nagel-Schreckenberg traffic automaton.
//!
//! # Pipeline order (each tick)
//!
//! 1. [`Accelerate`]: `v = min(v + 1, v_max)`
//! 2. [`Brake`]: `v = min(v, gap)` where `gap` counts free cells ahead
//! 3. [`Delay`]: with probability `p`, `v = v - 1` for moving cars
//! 4. [`Drive`]: move each car `v` cells forward
//!
//! [`standard_pipeline`] assembles them in this order.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accelerate;
pub mod brake;
pub mod delay;
pub mod drive;

pub use accelerate::Accelerate;
pub use brake::Brake;
pub use delay::Delay;
pub use drive::Drive;

use nasch_core::Velocity;
use nasch_phase::Phase;

/// Build the accelerate, brake, delay, drive pipeline.
///
/// # Errors
///
/// Returns `Err` if `delay_factor` is not a probability.
pub fn standard_pipeline(
    v_max: Velocity,
    delay_factor: f64,
) -> Result<Vec<Box<dyn Phase>>, String> {
    let delay = Delay::builder().probability(delay_factor).build()?;
    Ok(vec![
        Box::new(Accelerate::new(v_max)),
        Box::new(Brake),
        Box::new(delay),
        Box::new(Drive),
    ])
}
