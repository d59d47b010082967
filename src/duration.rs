//! Lengths of time on the timeline.

use std::fmt;

use crate::cal::{Error, LocalDateTime, LocalTime, TimePiece, ZoneOffset};
use crate::cal::fmt::ISO;
use crate::instant::Instant;


const NANOS_IN_SECOND: i128 = 1_000_000_000;


/// A **duration** is a length of time on the timeline, irrespective of
/// time zone or calendar format, with nanosecond precision.
///
/// The seconds carry the sign, and the nanoseconds are always a positive
/// adjustment within the second, so minus half a second is stored as
/// `-1` seconds plus `500_000_000` nanoseconds. Ordering by the two fields
/// in turn is therefore the same as ordering by length.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
pub struct Duration {
    seconds: i64,
    nanos: i32,
}

impl Duration {

    /// The zero-length duration.
    pub const ZERO: Duration = Duration { seconds: 0, nanos: 0 };

    /// Create a new duration that’s the given number of seconds long.
    pub fn of_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Create a new duration that’s the given number of seconds long,
    /// adjusted by any number of nanoseconds, positive or negative.
    ///
    /// ```rust
    /// use datetime_functions::Duration;
    ///
    /// let d = Duration::of_seconds_adjusted(3, -1).unwrap();
    /// assert_eq!((d.seconds(), d.nanos()), (2, 999_999_999));
    /// ```
    pub fn of_seconds_adjusted(seconds: i64, nano_adjustment: i64) -> Result<Self, Error> {
        Self::from_total_nanos(seconds as i128 * NANOS_IN_SECOND + nano_adjustment as i128)
    }

    /// Create a new duration that’s the given number of nanoseconds long.
    pub fn of_nanos(nanos: i64) -> Self {
        Self {
            seconds: nanos.div_euclid(NANOS_IN_SECOND as i64),
            nanos:   nanos.rem_euclid(NANOS_IN_SECOND as i64) as i32,
        }
    }

    /// Rebuilds the canonical form from a total number of nanoseconds,
    /// failing if the seconds no longer fit.
    pub(crate) fn from_total_nanos(total: i128) -> Result<Self, Error> {
        let seconds = i64::try_from(total.div_euclid(NANOS_IN_SECOND)).map_err(|_| Error::Overflow)?;
        let nanos = total.rem_euclid(NANOS_IN_SECOND) as i32;
        Ok(Self { seconds, nanos })
    }

    /// The whole seconds of this duration, carrying the sign.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// The nanosecond adjustment, always in `0 .. 1_000_000_000`.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// The whole length in nanoseconds.
    pub fn total_nanos(&self) -> i128 {
        self.seconds as i128 * NANOS_IN_SECOND + self.nanos as i128
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    pub fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    pub fn plus(self, other: Self) -> Result<Self, Error> {
        Self::from_total_nanos(self.total_nanos() + other.total_nanos())
    }

    pub fn minus(self, other: Self) -> Result<Self, Error> {
        Self::from_total_nanos(self.total_nanos() - other.total_nanos())
    }

    pub fn negated(self) -> Result<Self, Error> {
        Self::from_total_nanos(-self.total_nanos())
    }

    pub fn multiplied_by(self, scalar: i64) -> Result<Self, Error> {
        let total = self.total_nanos().checked_mul(scalar as i128).ok_or(Error::Overflow)?;
        Self::from_total_nanos(total)
    }

    /// Divides this duration by a scalar, truncating towards zero at
    /// nanosecond precision.
    pub fn divided_by(self, divisor: i64) -> Result<Self, Error> {
        if divisor == 0 {
            return Err(Error::DivisionByZero);
        }

        Self::from_total_nanos(self.total_nanos() / divisor as i128)
    }

    /// Returns the number of whole times the divisor fits into this
    /// duration, truncating towards zero.
    ///
    /// ```rust
    /// use datetime_functions::Duration;
    ///
    /// let hour = Duration::of_seconds(3600);
    /// let quarter = Duration::of_seconds(900);
    /// assert_eq!(hour.divided_by_duration(quarter), Ok(4));
    /// ```
    pub fn divided_by_duration(self, divisor: Self) -> Result<i64, Error> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }

        i64::try_from(self.total_nanos() / divisor.total_nanos()).map_err(|_| Error::Overflow)
    }

    /// The duration from one time of day to another, negative if the
    /// second is earlier in the day than the first.
    pub fn between_times(start: LocalTime, end: LocalTime) -> Self {
        Self::of_nanos(end.to_nanos() - start.to_nanos())
    }

    /// The duration between two local date-times, negative if the first
    /// comes after the second.
    pub fn between_datetimes(start: LocalDateTime, end: LocalDateTime) -> Result<Self, Error> {
        let seconds = end.to_epoch_second(ZoneOffset::UTC) - start.to_epoch_second(ZoneOffset::UTC);
        Self::of_seconds_adjusted(seconds, end.nanosecond() as i64 - start.nanosecond() as i64)
    }

    /// The duration between two instants, negative if the first comes
    /// after the second.
    pub fn between_instants(start: Instant, end: Instant) -> Result<Self, Error> {
        Self::from_total_nanos(end.total_nanos() - start.total_nanos())
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Duration({})", self.iso())
    }
}
