//! Clocks that pace the simulation loop.
//!
//! - [`SleepClock`] sleeps out the remaining budget and never stops.
//! - [`Unpaced`] returns at once and never stops.
//! - [`StopSignal`] waits on a channel, so a [`StopHandle`] on another
//!   thread can end the loop between ticks.
//! - [`Limit`] stops any clock after a fixed number of ticks.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use nasch_core::{Clock, Pace};

/// Sleeps for the remaining tick budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepClock;

impl Clock for SleepClock {
    fn wait(&mut self, remaining: Duration) -> Pace {
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        Pace::Continue
    }
}

/// Runs ticks back to back.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unpaced;

impl Clock for Unpaced {
    fn wait(&mut self, _remaining: Duration) -> Pace {
        Pace::Continue
    }
}

/// Create a linked stop handle and clock.
pub fn stop_signal() -> (StopHandle, StopSignal) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (StopHandle { tx }, StopSignal { rx })
}

/// Requests a [`StopSignal`] clock to stop.
#[derive(Clone, Debug)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    /// Ask the loop to stop at its next wait.
    ///
    /// Idempotent; further calls after the first are ignored.
    pub fn stop(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Clock that sleeps on a channel and stops when signalled.
///
/// Also stops once every [`StopHandle`] has been dropped.
#[derive(Debug)]
pub struct StopSignal {
    rx: Receiver<()>,
}

impl Clock for StopSignal {
    fn wait(&mut self, remaining: Duration) -> Pace {
        if remaining.is_zero() {
            return match self.rx.try_recv() {
                Err(TryRecvError::Empty) => Pace::Continue,
                Ok(()) | Err(TryRecvError::Disconnected) => Pace::Stop,
            };
        }
        match self.rx.recv_timeout(remaining) {
            Err(RecvTimeoutError::Timeout) => Pace::Continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => Pace::Stop,
        }
    }
}

/// Wraps a clock and stops after `ticks` waits.
#[derive(Debug)]
pub struct Limit<C> {
    inner: C,
    remaining: u64,
}

impl<C: Clock> Limit<C> {
    /// Stop after `ticks` ticks. A limit of 0 is treated as 1.
    pub fn new(inner: C, ticks: u64) -> Self {
        Self {
            inner,
            remaining: ticks.max(1),
        }
    }

    /// The wrapped clock.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Clock> Clock for Limit<C> {
    fn wait(&mut self, remaining: Duration) -> Pace {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return Pace::Stop;
        }
        self.inner.wait(remaining)
    }
}
