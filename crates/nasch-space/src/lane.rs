//! The circular single-lane road.

use nasch_core::{CellValue, Velocity};

use crate::error::SpaceError;
use crate::ring;

/// A ring of cells, each holding a car's velocity or the empty sentinel.
///
/// Cell `len - 1` is followed by cell `0`. Occupancy is boolean per
/// cell; cars carry no identity beyond their position and velocity.
///
/// # Examples
///
/// ```
/// use nasch_space::Lane;
///
/// let mut lane = Lane::new(10, -2).unwrap();
/// lane.place(0, 2).unwrap();
/// lane.place(5, 0).unwrap();
///
/// assert_eq!(lane.car_count(), 2);
/// assert_eq!(lane.velocity(0), Some(2));
/// assert_eq!(lane.velocity(1), None);
///
/// // Gap: free cells ahead of a car, capped by the probe limit.
/// assert_eq!(lane.gap_ahead(0, 5), 4);
/// assert_eq!(lane.gap_ahead(5, 9), 4); // wraps: 6, 7, 8, 9 then hits 0
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lane {
    cells: Vec<CellValue>,
    empty: CellValue,
}

impl Lane {
    /// Maximum length: velocities are stored as `i32`, and a velocity
    /// must stay below the lane length.
    pub const MAX_LEN: usize = i32::MAX as usize;

    /// Create a lane of `len` empty cells.
    ///
    /// Returns `Err(SpaceError::EmptyLane)` if `len == 0`, or
    /// `Err(SpaceError::LaneTooLarge)` if `len > MAX_LEN`.
    ///
    /// Any sentinel is accepted here. Keeping it outside `[0, v_max]`
    /// is the configuration's job; [`place`](Self::place) refuses a
    /// velocity equal to the sentinel.
    pub fn new(len: usize, empty: CellValue) -> Result<Self, SpaceError> {
        if len == 0 {
            return Err(SpaceError::EmptyLane);
        }
        if len > Self::MAX_LEN {
            return Err(SpaceError::LaneTooLarge {
                len,
                max: Self::MAX_LEN,
            });
        }
        Ok(Self {
            cells: vec![empty; len],
            empty,
        })
    }

    /// Build a lane from raw cell values.
    ///
    /// Every value must be a non-negative velocity or `empty`.
    pub fn from_cells(cells: Vec<CellValue>, empty: CellValue) -> Result<Self, SpaceError> {
        let mut lane = Self::new(cells.len(), empty)?;
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, &v)| v < 0 && v != empty)
        {
            return Err(SpaceError::InvalidCell { index, value });
        }
        lane.cells = cells;
        Ok(lane)
    }

    /// Build a lane of `len` cells holding the given `(index, velocity)` cars.
    pub fn with_cars(
        len: usize,
        empty: CellValue,
        cars: &[(usize, Velocity)],
    ) -> Result<Self, SpaceError> {
        let mut lane = Self::new(len, empty)?;
        for &(index, velocity) in cars {
            lane.place(index, velocity)?;
        }
        Ok(lane)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always returns `false`: construction rejects `len == 0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The sentinel marking an empty cell.
    pub fn empty_value(&self) -> CellValue {
        self.empty
    }

    /// Raw cell values in index order.
    pub fn as_slice(&self) -> &[CellValue] {
        &self.cells
    }

    /// Raw value of cell `index`, or `None` if out of bounds.
    pub fn raw(&self, index: usize) -> Option<CellValue> {
        self.cells.get(index).copied()
    }

    /// Velocity of the car at `index`, or `None` if the cell is empty
    /// or out of bounds.
    #[inline]
    pub fn velocity(&self, index: usize) -> Option<Velocity> {
        match self.cells.get(index) {
            Some(&v) if v != self.empty => Some(v as Velocity),
            _ => None,
        }
    }

    /// Whether a car occupies `index`.
    #[inline]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.velocity(index).is_some()
    }

    /// Put a new car with `velocity` on the empty cell `index`.
    pub fn place(&mut self, index: usize, velocity: Velocity) -> Result<(), SpaceError> {
        if velocity > MAX_CELL_VELOCITY {
            return Err(SpaceError::VelocityOutOfRange {
                velocity,
                max: MAX_CELL_VELOCITY,
            });
        }
        if i64::from(velocity) == i64::from(self.empty) {
            return Err(SpaceError::VelocityIsSentinel {
                velocity,
                empty: self.empty,
            });
        }
        let len = self.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(SpaceError::IndexOutOfBounds { index, len })?;
        if *cell != self.empty {
            return Err(SpaceError::CellOccupied { index });
        }
        *cell = to_cell(velocity);
        Ok(())
    }

    /// Overwrite cell `index` with a car of `velocity`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn set_velocity(&mut self, index: usize, velocity: Velocity) {
        self.cells[index] = to_cell(velocity);
    }

    /// Empty cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        self.cells[index] = self.empty;
    }

    /// Empty every cell.
    pub fn clear_all(&mut self) {
        self.cells.fill(self.empty);
    }

    /// Overwrite this lane's cells with `other`'s.
    ///
    /// Returns `Err(SpaceError::LengthMismatch)` if the lengths differ.
    pub fn copy_from(&mut self, other: &Lane) -> Result<(), SpaceError> {
        if other.len() != self.len() {
            return Err(SpaceError::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        self.cells.copy_from_slice(&other.cells);
        self.empty = other.empty;
        Ok(())
    }

    /// Index `offset` cells ahead of `from`, wrapping around the ring.
    #[inline]
    pub fn ahead(&self, from: usize, offset: usize) -> usize {
        ring::wrap_forward(from, offset, self.len())
    }

    /// Count of consecutive empty cells directly ahead of `from`,
    /// probing at most `limit` cells.
    ///
    /// The probe visits `from + 1 ..= from + limit` (wrapping) and stops
    /// at the first occupied cell. Probing never passes `from` itself,
    /// so on a lane of `n` cells the result is at most `n - 1`.
    pub fn gap_ahead(&self, from: usize, limit: Velocity) -> Velocity {
        let len = self.len();
        let limit = (limit as usize).min(len - 1);
        let mut gap = 0;
        for step in 1..=limit {
            if self.cells[ring::wrap_forward(from, step, len)] != self.empty {
                break;
            }
            gap += 1;
        }
        gap
    }

    /// Number of occupied cells.
    pub fn car_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != self.empty).count()
    }

    /// Occupied cells as `(index, velocity)` in index order.
    pub fn cars(&self) -> impl Iterator<Item = (usize, Velocity)> + '_ {
        let empty = self.empty;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, &v)| v != empty)
            .map(|(i, &v)| (i, v as Velocity))
    }
}

/// Largest velocity a cell can hold.
const MAX_CELL_VELOCITY: Velocity = i32::MAX as Velocity;

/// Velocities are bounded by the lane length, which fits `i32`.
#[inline]
fn to_cell(velocity: Velocity) -> CellValue {
    debug_assert!(
        velocity <= MAX_CELL_VELOCITY,
        "velocity {velocity} does not fit a cell"
    );
    velocity as CellValue
}
