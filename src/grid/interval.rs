use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A closed `(lo, hi)` pair along one axis or calendar dimension.
///
/// A usable interval is strictly ordered; a single value is requested through
/// the single-value operations instead of a degenerate `lo == hi` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval<T> {
    pub lo: T,
    pub hi: T,
}

impl<T> Interval<T> {
    pub const fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }
}

impl<T: PartialOrd> Interval<T> {
    /// `true` when `lo < hi`.
    pub fn is_ordered(&self) -> bool {
        self.lo < self.hi
    }

    /// `true` when `bounds.lo <= lo < hi <= bounds.hi`.
    pub fn is_within(&self, bounds: &Interval<T>) -> bool {
        bounds.lo <= self.lo && self.is_ordered() && self.hi <= bounds.hi
    }

    /// `true` when `bounds.lo <= value <= bounds.hi`.
    pub fn contains(&self, value: &T) -> bool {
        self.lo <= *value && *value <= self.hi
    }
}

impl<T> From<(T, T)> for Interval<T> {
    fn from((lo, hi): (T, T)) -> Self {
        Self { lo, hi }
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}
