//! Collaborator doubles for loop and engine tests.
//!
//! - [`RecordingRenderer`] keeps a copy of every stack it is handed.
//! - [`FailingRenderer`] errors on the Nth frame.
//! - [`StopAfter`] is a clock that never sleeps and stops after N waits.

use std::time::Duration;

use nasch_core::{Clock, CellValue, Pace, RenderError, Renderer, SnapshotStack, TickId};

/// One rendered frame: the tick and a copy of every row, most recent first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub tick: TickId,
    pub rows: Vec<Vec<CellValue>>,
}

/// Records each frame it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Frame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently recorded frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, tick: TickId, stack: &dyn SnapshotStack) -> Result<(), RenderError> {
        let rows = (0..stack.depth())
            .filter_map(|i| stack.row(i).map(<[CellValue]>::to_vec))
            .collect();
        self.frames.push(Frame { tick, rows });
        Ok(())
    }
}

/// Succeeds `succeed_count` times, then returns [`RenderError::Output`].
#[derive(Debug)]
pub struct FailingRenderer {
    succeed_count: usize,
    calls: usize,
}

impl FailingRenderer {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Renderer for FailingRenderer {
    fn render(&mut self, _tick: TickId, _stack: &dyn SnapshotStack) -> Result<(), RenderError> {
        self.calls += 1;
        if self.calls > self.succeed_count {
            return Err(RenderError::Output {
                reason: format!("display closed after {} frames", self.succeed_count),
            });
        }
        Ok(())
    }
}

/// Clock that returns immediately and stops after `limit` waits.
///
/// Records every budget it was offered so tests can inspect pacing.
#[derive(Debug)]
pub struct StopAfter {
    limit: usize,
    pub waits: Vec<Duration>,
}

impl StopAfter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            waits: Vec::new(),
        }
    }
}

impl Clock for StopAfter {
    fn wait(&mut self, remaining: Duration) -> Pace {
        self.waits.push(remaining);
        if self.waits.len() >= self.limit {
            Pace::Stop
        } else {
            Pace::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockStack;

    #[test]
    fn recording_renderer_copies_rows() {
        let stack = MockStack::new(vec![vec![1, -2], vec![-2, 0]], -2, 5);
        let mut r = RecordingRenderer::new();
        r.render(TickId(4), &stack).unwrap();
        let frame = r.last().unwrap();
        assert_eq!(frame.tick, TickId(4));
        assert_eq!(frame.rows, vec![vec![1, -2], vec![-2, 0]]);
    }

    #[test]
    fn failing_renderer_fails_after_count() {
        let stack = MockStack::new(vec![vec![-2]], -2, 1);
        let mut r = FailingRenderer::new(1);
        assert!(r.render(TickId(1), &stack).is_ok());
        assert!(r.render(TickId(2), &stack).is_err());
        assert_eq!(r.calls(), 2);
    }

    #[test]
    fn stop_after_counts_waits() {
        let mut clock = StopAfter::new(2);
        assert_eq!(clock.wait(Duration::from_millis(5)), Pace::Continue);
        assert_eq!(clock.wait(Duration::ZERO), Pace::Stop);
        assert_eq!(clock.waits, vec![Duration::from_millis(5), Duration::ZERO]);
    }
}
