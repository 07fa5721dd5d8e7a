//! Cell value conventions.
//!
//! A lane cell stores either the velocity of the car occupying it or a
//! configured sentinel meaning "no car here". The sentinel is chosen by
//! configuration and must lie outside `[0, v_max]`, so a raw
//! [`CellValue`] is unambiguous without a side table.

/// Raw value stored in a lane cell: a velocity in `[0, v_max]` or the
/// lane's empty sentinel.
pub type CellValue = i32;

/// Velocity of a car in cells per tick.
pub type Velocity = u32;

/// Empty sentinel used when none is configured.
pub const DEFAULT_EMPTY: CellValue = -2;

/// Whether `empty` can serve as a sentinel for lanes whose velocities
/// range over `[0, v_max]`.
pub fn is_valid_sentinel(empty: CellValue, v_max: Velocity) -> bool {
    empty < 0 || i64::from(empty) > i64::from(v_max)
}
