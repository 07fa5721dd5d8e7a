//! Collaborator traits: snapshot access, rendering, and pacing.
//!
//! The simulation core never draws frames or sleeps on its own. It
//! hands a read-only [`SnapshotStack`] to a [`Renderer`] and asks a
//! [`Clock`] to wait between ticks.

use std::time::Duration;

use crate::cell::{CellValue, Velocity};
use crate::error::RenderError;
use crate::id::TickId;

/// Read-only access to a stack of lane snapshots, most recent first.
///
/// Decouples renderers from the history buffer implementation. Every
/// row has the same length (the lane's cell count).
pub trait SnapshotStack {
    /// Number of rows in the stack (the configured history depth).
    fn depth(&self) -> usize;

    /// Cells of row `index`, where row 0 is the most recent snapshot.
    ///
    /// Returns `None` if `index >= depth()`.
    fn row(&self, index: usize) -> Option<&[CellValue]>;

    /// The sentinel marking an empty cell.
    fn empty_value(&self) -> CellValue;

    /// The configured maximum velocity.
    fn v_max(&self) -> Velocity;

    /// Number of cells per row.
    fn cell_count(&self) -> usize {
        self.row(0).map_or(0, <[CellValue]>::len)
    }
}

/// Consumes one snapshot stack per tick.
///
/// Implementations must not block indefinitely. The stack is borrowed
/// only for the duration of the call.
pub trait Renderer {
    /// Present the stack produced by tick `tick`.
    fn render(&mut self, tick: TickId, stack: &dyn SnapshotStack) -> Result<(), RenderError>;
}

/// Outcome of a [`Clock::wait`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pace {
    /// Run the next tick.
    Continue,
    /// Stop the loop before the next tick.
    Stop,
}

/// Paces the simulation loop between ticks.
///
/// The only suspension point of the loop. A clock may also end the run
/// by returning [`Pace::Stop`]; this is how an external host stops the
/// simulation cleanly between ticks.
pub trait Clock {
    /// Block for up to `remaining`, the part of the tick budget not
    /// consumed by the tick itself.
    fn wait(&mut self, remaining: Duration) -> Pace;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, tick: TickId, stack: &dyn SnapshotStack) -> Result<(), RenderError> {
        (**self).render(tick, stack)
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn wait(&mut self, remaining: Duration) -> Pace {
        (**self).wait(remaining)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, tick: TickId, stack: &dyn SnapshotStack) -> Result<(), RenderError> {
        (**self).render(tick, stack)
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn wait(&mut self, remaining: Duration) -> Pace {
        (**self).wait(remaining)
    }
}
