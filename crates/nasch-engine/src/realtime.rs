//! Background-thread simulation with a cooperative stop.
//!
//! [`RealtimeSim`] moves a [`LockstepSim`] onto a named thread and runs
//! [`run_loop`] there with a [`StopSignal`] clock paced by `delta_t`.
//! The newest window is published after every tick for other threads
//! to read.
//!
//! ```text
//! Caller thread                 nasch-tick thread
//!     |                               |
//!     |--start()--------------------->| loop {
//!     |                               |   sim.step()
//!     |<--latest() (Arc<Mutex>)-------|   publish window, render
//!     |                               |   stop_rx.recv_timeout(budget)
//!     |--stop() (stop_tx)------------>| }
//!     |<--join: (LockstepSim, report)-|
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use nasch_core::{RenderError, Renderer, SnapshotStack, TickId};

use crate::clock::{stop_signal, StopHandle};
use crate::error::LoopError;
use crate::history::WindowSnapshot;
use crate::lockstep::LockstepSim;
use crate::sim_loop::{run_loop, RunReport};

type Latest = Arc<Mutex<Option<WindowSnapshot>>>;
type LoopOutcome = (LockstepSim, Result<RunReport, LoopError>);

fn lock(latest: &Latest) -> MutexGuard<'_, Option<WindowSnapshot>> {
    // A poisoned slot still holds a complete snapshot.
    latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stores each window before passing it on.
struct Publishing<R> {
    inner: R,
    latest: Latest,
}

impl<R: Renderer> Renderer for Publishing<R> {
    fn render(&mut self, tick: TickId, stack: &dyn SnapshotStack) -> Result<(), RenderError> {
        *lock(&self.latest) = Some(WindowSnapshot::capture(tick, stack));
        self.inner.render(tick, stack)
    }
}

/// Simulation running on a background thread.
///
/// Dropping the handle stops and joins the thread, discarding the
/// simulation. Call [`stop`](RealtimeSim::stop) to recover it.
pub struct RealtimeSim {
    stop: StopHandle,
    thread: Option<JoinHandle<LoopOutcome>>,
    latest: Latest,
}

impl RealtimeSim {
    /// Start `sim` on a thread named `nasch-tick`, rendering each tick
    /// with `renderer`.
    pub fn start<R>(mut sim: LockstepSim, renderer: R) -> Result<Self, LoopError>
    where
        R: Renderer + Send + 'static,
    {
        let (stop, clock) = stop_signal();
        let latest: Latest = Arc::new(Mutex::new(None));
        let publishing = Publishing {
            inner: renderer,
            latest: Arc::clone(&latest),
        };
        let thread = thread::Builder::new()
            .name("nasch-tick".into())
            .spawn(move || {
                let result = run_loop(&mut sim, publishing, clock);
                (sim, result)
            })
            .map_err(|e| LoopError::Spawn {
                reason: e.to_string(),
            })?;
        Ok(Self {
            stop,
            thread: Some(thread),
            latest,
        })
    }

    /// Copy of the most recently rendered window, if any tick has run.
    pub fn latest(&self) -> Option<WindowSnapshot> {
        lock(&self.latest).clone()
    }

    /// Whether the loop has already ended on its own (renderer failure
    /// or tick error).
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop between ticks, join the thread and hand back the simulation.
    pub fn stop(mut self) -> Result<(LockstepSim, RunReport), LoopError> {
        self.stop.stop();
        let handle = self.thread.take().ok_or(LoopError::Panicked)?;
        let (sim, result) = handle.join().map_err(|_| LoopError::Panicked)?;
        Ok((sim, result?))
    }
}

impl Drop for RealtimeSim {
    fn drop(&mut self) {
        if let Some(handle) = self.thread.take() {
            self.stop.stop();
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for RealtimeSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeSim")
            .field("finished", &self.is_finished())
            .finish()
    }
}
