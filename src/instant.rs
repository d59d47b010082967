//! Exact points on a timeline.

use std::fmt;

use crate::cal::Error;
use crate::cal::fmt::ISO;
use crate::duration::Duration;
use crate::util::RangeExt;


const NANOS_IN_SECOND: i128 = 1_000_000_000;

/// The first second of the year -1,000,000,000, and the last second of the
/// year 1,000,000,000, counted from the Unix epoch.
const MIN_SECOND: i64 = -31_557_014_167_219_200;
const MAX_SECOND: i64 =  31_556_889_864_403_199;


/// An **instant** is an exact point on the timeline, irrespective of time
/// zone or calendar format, with nanosecond precision.
///
/// Internally, this is represented by a 64-bit integer of seconds since
/// the Unix epoch, and a nanosecond of that second that is never negative.
/// Instants are limited to a range of about a billion years either side of
/// the epoch, a little wider than the range of `LocalDate`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Instant {
    seconds: i64,
    nanos: i32,
}

impl Instant {

    /// The Unix epoch, midnight of the 1st January 1970 UTC.
    pub const EPOCH: Instant = Instant { seconds: 0, nanos: 0 };

    /// Creates a new Instant set to the number of seconds since the Unix
    /// epoch, adjusted by any number of nanoseconds.
    ///
    /// ```rust
    /// use datetime_functions::Instant;
    ///
    /// let instant = Instant::of_epoch_second(3, -1).unwrap();
    /// assert_eq!((instant.seconds(), instant.nanos()), (2, 999_999_999));
    /// ```
    pub fn of_epoch_second(seconds: i64, nano_adjustment: i64) -> Result<Self, Error> {
        Self::from_total_nanos(seconds as i128 * NANOS_IN_SECOND + nano_adjustment as i128)
    }

    /// Creates a new Instant set to the number of milliseconds since the
    /// Unix epoch.
    pub fn of_epoch_milli(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1000),
            nanos:   millis.rem_euclid(1000) as i32 * 1_000_000,
        }
    }

    fn from_total_nanos(total: i128) -> Result<Self, Error> {
        let seconds = total.div_euclid(NANOS_IN_SECOND);
        if ! seconds.is_within(MIN_SECOND as i128 .. MAX_SECOND as i128 + 1) {
            return Err(Error::OutOfRange);
        }

        Ok(Self {
            seconds: seconds as i64,
            nanos: total.rem_euclid(NANOS_IN_SECOND) as i32,
        })
    }

    /// Returns the number of seconds at this instant
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the nanosecond of the second at this instant
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    pub(crate) fn total_nanos(&self) -> i128 {
        self.seconds as i128 * NANOS_IN_SECOND + self.nanos as i128
    }

    pub fn plus(self, duration: Duration) -> Result<Self, Error> {
        Self::from_total_nanos(self.total_nanos() + duration.total_nanos())
    }

    pub fn minus(self, duration: Duration) -> Result<Self, Error> {
        Self::from_total_nanos(self.total_nanos() - duration.total_nanos())
    }

    pub fn plus_seconds(self, seconds: i64) -> Result<Self, Error> {
        Self::from_total_nanos(self.total_nanos() + seconds as i128 * NANOS_IN_SECOND)
    }

    pub fn plus_nanos(self, nanos: i64) -> Result<Self, Error> {
        Self::from_total_nanos(self.total_nanos() + nanos as i128)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Instant({})", self.iso())
    }
}
