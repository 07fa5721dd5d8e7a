//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing tick counter.
///
/// `TickId(0)` is the freshly initialised lane; each completed
/// accelerate/brake/delay/drive pass increments it by one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(TickId(0).next(), TickId(1));
        assert_eq!(TickId(41).next().next(), TickId(43));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(TickId(7).to_string(), "7");
    }
}
