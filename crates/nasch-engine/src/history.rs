//! Fixed-depth stack of lane snapshots for visualisation.
//!
//! [`HistoryBuffer`] holds `depth` lanes, row 0 most recent. Row 0 is
//! also the working lane: [`shift`](HistoryBuffer::shift) pushes every
//! row one slot older and leaves a copy of the previous state in row 0,
//! which the tick engine then advances.

use nasch_core::{CellValue, SnapshotStack, TickId, Velocity};
use nasch_space::{Lane, SpaceError};

/// Most cells a history buffer may hold across all of its rows.
pub const MAX_HISTORY_CELLS: usize = Lane::MAX_LEN;

/// Stack of the last `depth` lane states, most recent first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryBuffer {
    rows: Vec<Lane>,
    v_max: Velocity,
}

impl HistoryBuffer {
    /// Allocate `depth` rows of `cells` empty cells.
    ///
    /// # Panics
    ///
    /// Panics if `depth == 0`. The configuration resolver rejects a
    /// zero history before a buffer is ever built.
    ///
    /// # Errors
    ///
    /// `Err(SpaceError::LaneTooLarge)` if `depth × cells` exceeds
    /// [`MAX_HISTORY_CELLS`].
    pub fn new(
        depth: usize,
        cells: usize,
        empty: CellValue,
        v_max: Velocity,
    ) -> Result<Self, SpaceError> {
        assert!(depth >= 1, "HistoryBuffer depth must be >= 1, got {depth}");
        match depth.checked_mul(cells) {
            Some(total) if total <= MAX_HISTORY_CELLS => {}
            _ => {
                return Err(SpaceError::LaneTooLarge {
                    len: depth.saturating_mul(cells),
                    max: MAX_HISTORY_CELLS,
                })
            }
        }
        let blank = Lane::new(cells, empty)?;
        Ok(Self {
            rows: vec![blank; depth],
            v_max,
        })
    }

    /// Age every row by one and duplicate the newest into row 0.
    ///
    /// The oldest row is discarded. With a depth of 1 this is a no-op.
    pub fn shift(&mut self) {
        if self.rows.len() < 2 {
            return;
        }
        self.rows.rotate_right(1);
        let (head, tail) = self.rows.split_at_mut(1);
        head[0].clone_from(&tail[0]);
    }

    /// The most recent lane.
    pub fn current(&self) -> &Lane {
        &self.rows[0]
    }

    /// Mutable access to the most recent lane.
    pub fn current_mut(&mut self) -> &mut Lane {
        &mut self.rows[0]
    }

    /// Row `index`, 0 being the most recent.
    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Empty every row.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear_all();
        }
    }

    /// Read-only view of the whole stack.
    pub fn window(&self) -> HistoryWindow<'_> {
        HistoryWindow { buffer: self }
    }
}

impl SnapshotStack for HistoryBuffer {
    fn depth(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Lane::as_slice)
    }

    fn empty_value(&self) -> CellValue {
        self.rows[0].empty_value()
    }

    fn v_max(&self) -> Velocity {
        self.v_max
    }
}

// ── Views ──────────────────────────────────────────────────────────

/// Borrowed view of a [`HistoryBuffer`] handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct HistoryWindow<'a> {
    buffer: &'a HistoryBuffer,
}

impl<'a> HistoryWindow<'a> {
    /// Lanes most recent first.
    pub fn lanes(&self) -> impl Iterator<Item = &'a Lane> {
        self.buffer.rows.iter()
    }

    /// Copy the window so it can outlive the buffer.
    pub fn to_snapshot(&self, tick: TickId) -> WindowSnapshot {
        WindowSnapshot::capture(tick, self)
    }
}

impl SnapshotStack for HistoryWindow<'_> {
    fn depth(&self) -> usize {
        SnapshotStack::depth(self.buffer)
    }

    fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.buffer.row(index)
    }

    fn empty_value(&self) -> CellValue {
        self.buffer.empty_value()
    }

    fn v_max(&self) -> Velocity {
        self.buffer.v_max
    }
}

/// Owned copy of a history window, tagged with the tick that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSnapshot {
    tick: TickId,
    rows: Vec<Vec<CellValue>>,
    empty: CellValue,
    v_max: Velocity,
}

impl WindowSnapshot {
    /// Copy every row of `stack`.
    pub fn capture(tick: TickId, stack: &dyn SnapshotStack) -> Self {
        Self {
            tick,
            rows: (0..stack.depth())
                .filter_map(|i| stack.row(i).map(<[CellValue]>::to_vec))
                .collect(),
            empty: stack.empty_value(),
            v_max: stack.v_max(),
        }
    }

    /// Tick that produced the newest row.
    pub fn tick(&self) -> TickId {
        self.tick
    }
}

impl SnapshotStack for WindowSnapshot {
    fn depth(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    fn empty_value(&self) -> CellValue {
        self.empty
    }

    fn v_max(&self) -> Velocity {
        self.v_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: CellValue = -2;

    fn buffer(depth: usize) -> HistoryBuffer {
        HistoryBuffer::new(depth, 5, EMPTY, 3).unwrap()
    }

    #[test]
    fn starts_all_empty() {
        let h = buffer(3);
        assert_eq!(SnapshotStack::depth(&h), 3);
        for i in 0..3 {
            assert!(h.row(i).unwrap().iter().all(|&c| c == EMPTY));
        }
        assert!(h.row(3).is_none());
    }

    #[test]
    fn oversized_depth_rejected_without_allocating() {
        assert_eq!(
            HistoryBuffer::new(usize::MAX, 5, EMPTY, 3).unwrap_err(),
            SpaceError::LaneTooLarge {
                len: usize::MAX,
                max: MAX_HISTORY_CELLS,
            }
        );
        assert!(HistoryBuffer::new(MAX_HISTORY_CELLS / 5 + 1, 5, EMPTY, 3).is_err());
    }

    #[test]
    fn shift_ages_rows_and_copies_current() {
        let mut h = buffer(3);
        h.current_mut().place(0, 1).unwrap();
        h.shift();
        // Row 0 is a working copy of the previous state.
        assert_eq!(h.current().velocity(0), Some(1));
        assert_eq!(h.get(1).unwrap().velocity(0), Some(1));

        h.current_mut().clear(0);
        h.current_mut().place(1, 1).unwrap();
        h.shift();
        assert_eq!(h.get(0).unwrap().velocity(1), Some(1));
        assert_eq!(h.get(1).unwrap().velocity(1), Some(1));
        assert_eq!(h.get(2).unwrap().velocity(0), Some(1));
    }

    #[test]
    fn oldest_row_falls_off() {
        let mut h = buffer(2);
        h.current_mut().place(4, 2).unwrap();
        h.shift();
        h.current_mut().clear_all();
        h.shift();
        h.shift();
        assert_eq!(h.get(1).unwrap().car_count(), 0);
    }

    #[test]
    fn depth_one_shift_is_noop() {
        let mut h = buffer(1);
        h.current_mut().place(2, 3).unwrap();
        h.shift();
        assert_eq!(h.current().velocity(2), Some(3));
        assert_eq!(SnapshotStack::depth(&h), 1);
    }

    #[test]
    fn window_and_snapshot_agree() {
        let mut h = buffer(2);
        h.current_mut().place(3, 2).unwrap();
        h.shift();
        let window = h.window();
        let snap = window.to_snapshot(TickId(7));
        assert_eq!(snap.tick(), TickId(7));
        assert_eq!(window.cell_count(), 5);
        for i in 0..2 {
            assert_eq!(window.row(i), snap.row(i));
        }
        assert_eq!(snap.empty_value(), EMPTY);
        assert_eq!(snap.v_max(), 3);
        assert_eq!(window.lanes().count(), 2);
    }

    #[test]
    fn clear_empties_all_rows() {
        let mut h = buffer(2);
        h.current_mut().place(0, 0).unwrap();
        h.shift();
        h.clear();
        assert!(h.window().lanes().all(|l| l.car_count() == 0));
    }

    #[test]
    #[should_panic(expected = "depth must be >= 1")]
    fn zero_depth_panics() {
        let _ = HistoryBuffer::new(0, 5, EMPTY, 3);
    }
}
