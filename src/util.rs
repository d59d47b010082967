//! Misc stuff.

use std::ops::Range;


pub(crate) trait RangeExt {

    /// Returns whether this value exists within the given range of values.
    fn is_within(&self, range: Range<Self>) -> bool where Self: Sized;
}

// Define RangeExt on *anything* that can be compared, though it’s only
// really ever used for numeric ranges...

impl<T> RangeExt for T where T: PartialOrd<T> {
    fn is_within(&self, range: Range<Self>) -> bool {
        *self >= range.start && *self < range.end
    }
}


/// Split a number of periods into a number of whole cycles, and the
/// number of periods left over that don’t fit into a cycle.
///
/// This is essentially a division operation with the result and the
/// remainder, with the difference that a negative value gets “wrapped
/// around” to be a positive value, owing to the way the modulo operator
/// works for negative values.
pub(crate) fn split_cycles(number_of_periods: i64, cycle_length: i64) -> (i64, i64) {
    let mut cycles    = number_of_periods / cycle_length;
    let mut remainder = number_of_periods % cycle_length;

    if remainder < 0 {
        remainder += cycle_length;
        cycles    -= 1;
    }

    (cycles, remainder)
}


#[cfg(test)]
mod test {
    use super::{split_cycles, RangeExt};

    #[test]
    fn within() {
        assert!(5.is_within(0..6));
        assert!(!6.is_within(0..6));
        assert!(!(-1).is_within(0..6));
    }

    #[test]
    fn positive_cycles() {
        assert_eq!(split_cycles(25, 12), (2, 1));
    }

    #[test]
    fn negative_cycles() {
        assert_eq!(split_cycles(-1, 12), (-1, 11));
        assert_eq!(split_cycles(-24, 12), (-2, 0));
    }
}
