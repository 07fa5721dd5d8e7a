//! Wrap-around index arithmetic for a ring of `len` cells.

/// Index `offset` cells ahead of `from` on a ring of `len` cells.
///
/// Both operands are reduced modulo `len` first, so the sum never
/// overflows regardless of their magnitude.
pub fn wrap_forward(from: usize, offset: usize, len: usize) -> usize {
    debug_assert!(len > 0, "ring length must be positive");
    let a = from % len;
    let b = offset % len;
    if a >= len - b {
        a - (len - b)
    } else {
        a + b
    }
}

/// Number of steps forward from `from` to reach `to`.
///
/// Always in `[0, len)`; `forward_distance(i, i, len) == 0`.
pub fn forward_distance(from: usize, to: usize, len: usize) -> usize {
    debug_assert!(len > 0, "ring length must be positive");
    let (from, to) = (from % len, to % len);
    if to >= from {
        to - from
    } else {
        len - (from - to)
    }
}
