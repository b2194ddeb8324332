//! Bounded configuration values.

use core::cmp;

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a tunable.
///
/// Values supplied by a user are trimmed into the range via
/// [`limit`][Self::limit] rather than rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DefMinMax<T> {
    /// The default value.
    def: T,

    /// The minimum value.
    min: T,

    /// The maximum value.
    max: T,
}

impl<T> DefMinMax<T> {
    /// Creates a new value.
    pub const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    pub fn default(self) -> T {
        self.def
    }

    /// Trims the given value to fit into the minimum/maximum range.
    pub fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limit() {
        let mac_len = DefMinMax::new(32usize, 16, 32);
        assert_eq!(mac_len.default(), 32);
        assert_eq!(mac_len.limit(8), 16);
        assert_eq!(mac_len.limit(20), 20);
        assert_eq!(mac_len.limit(64), 32);
    }
}
