//! Terminal heatmap renderer.
//!
//! Draws the history window as coloured blocks, one text row per
//! snapshot with the oldest at the top and the current lane at the
//! bottom. Time runs downward and cars drift rightward, so jams show
//! up as diagonal streaks moving against traffic. Lanes wider than
//! the terminal are downsampled; each column shows the fastest car in
//! its bucket.

use std::io::Write;

use nasch_core::{CellValue, RenderError, Renderer, SnapshotStack, TickId, Velocity};

const RESET: &str = "\x1b[0m";
const HOME_AND_CLEAR: &str = "\x1b[H\x1b[2J";

/// Renders each frame as ANSI truecolour blocks.
pub struct Heatmap<W: Write> {
    out: W,
    width: usize,
    clear: bool,
    frame: String,
}

impl<W: Write> Heatmap<W> {
    /// Render into `out`, at most `width` columns per row.
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(1),
            clear: true,
            frame: String::new(),
        }
    }

    /// Skip the clear-screen prefix, leaving frames stacked.
    pub fn without_clear(mut self) -> Self {
        self.clear = false;
        self
    }

    /// Consume the renderer, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn compose(&mut self, tick: TickId, stack: &dyn SnapshotStack) {
        self.frame.clear();
        if self.clear {
            self.frame.push_str(HOME_AND_CLEAR);
        }
        self.frame.push_str(&format!(
            "tick {tick}  cells {}  v_max {}\n",
            stack.cell_count(),
            stack.v_max()
        ));
        let v_max = stack.v_max();
        let empty = stack.empty_value();
        for index in (0..stack.depth()).rev() {
            let Some(row) = stack.row(index) else {
                continue;
            };
            for bucket in bucket_max(row, empty, self.width) {
                match bucket {
                    Some(v) => {
                        let (r, g, b) = velocity_colour(v, v_max);
                        self.frame
                            .push_str(&format!("\x1b[48;2;{r};{g};{b}m {RESET}"));
                    }
                    None => self.frame.push(' '),
                }
            }
            self.frame.push('\n');
        }
    }
}

impl<W: Write> Renderer for Heatmap<W> {
    fn render(&mut self, tick: TickId, stack: &dyn SnapshotStack) -> Result<(), RenderError> {
        self.compose(tick, stack);
        self.out
            .write_all(self.frame.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| RenderError::Output {
                reason: e.to_string(),
            })
    }
}

/// Split `row` into at most `width` contiguous buckets, each holding the
/// highest velocity among its cars or `None` when it has none.
pub fn bucket_max(row: &[CellValue], empty: CellValue, width: usize) -> Vec<Option<Velocity>> {
    let n = row.len();
    let columns = width.min(n);
    (0..columns)
        .map(|i| {
            let start = i * n / columns;
            let end = (i + 1) * n / columns;
            row[start..end]
                .iter()
                .filter(|&&value| value != empty)
                .map(|&value| value.max(0) as Velocity)
                .max()
        })
        .collect()
}

/// Map a velocity onto a red→yellow→green ramp over `[0, v_max]`.
pub fn velocity_colour(v: Velocity, v_max: Velocity) -> (u8, u8, u8) {
    let t = if v_max == 0 {
        1.0
    } else {
        (f64::from(v) / f64::from(v_max)).min(1.0)
    };
    if t < 0.5 {
        (255, (510.0 * t).round() as u8, 0)
    } else {
        ((510.0 * (1.0 - t)).round() as u8, 255, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nasch_test_utils::MockStack;

    const E: CellValue = -2;

    #[test]
    fn buckets_identity_when_narrow_lane() {
        let row = [E, 0, 3, E];
        assert_eq!(bucket_max(&row, E, 80), vec![None, Some(0), Some(3), None]);
    }

    #[test]
    fn buckets_keep_fastest_car() {
        let row = [1, 4, E, E, 2, E];
        assert_eq!(bucket_max(&row, E, 3), vec![Some(4), None, Some(2)]);
    }

    #[test]
    fn buckets_cover_every_cell() {
        // 7 cells into 3 columns: [0..2), [2..4), [4..7).
        let row = [E, E, E, E, E, E, 5];
        assert_eq!(bucket_max(&row, E, 3), vec![None, None, Some(5)]);
    }

    #[test]
    fn colour_ramp_endpoints() {
        assert_eq!(velocity_colour(0, 4), (255, 0, 0));
        assert_eq!(velocity_colour(2, 4), (255, 255, 0));
        assert_eq!(velocity_colour(4, 4), (0, 255, 0));
    }

    #[test]
    fn zero_limit_is_green() {
        assert_eq!(velocity_colour(0, 0), (0, 255, 0));
    }

    #[test]
    fn frame_draws_oldest_row_first() {
        let stack = MockStack::new(vec![vec![E, 1], vec![0, E]], E, 1);
        let mut heatmap = Heatmap::new(Vec::new(), 80).without_clear();
        heatmap.render(TickId(2), &stack).unwrap();
        let text = String::from_utf8(heatmap.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("tick 2"));
        // Row 1 (older) has a stopped car in the first column.
        assert!(lines[1].starts_with("\x1b[48;2;255;0;0m"));
        assert!(lines[1].ends_with(' '));
        // Row 0 (current) has an empty first column.
        assert!(lines[2].starts_with(' '));
        assert!(lines[2].contains("\x1b[48;2;0;255;0m"));
    }

    #[test]
    fn clear_prefix_by_default() {
        let stack = MockStack::new(vec![vec![E]], E, 1);
        let mut heatmap = Heatmap::new(Vec::new(), 10);
        heatmap.render(TickId(1), &stack).unwrap();
        assert!(heatmap.into_inner().starts_with(HOME_AND_CLEAR.as_bytes()));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_becomes_render_error() {
        let stack = MockStack::new(vec![vec![E]], E, 1);
        let mut heatmap = Heatmap::new(Broken, 10);
        match heatmap.render(TickId(1), &stack) {
            Err(RenderError::Output { reason }) => assert!(reason.contains("closed")),
            other => panic!("expected Output error, got {other:?}"),
        }
    }
}
