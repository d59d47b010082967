//! Datetimes with a fixed UTC offset.

use std::cmp::Ordering;
use std::fmt;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::datetime::{Error, LocalDate, LocalDateTime, LocalTime, Month, Weekday};
use crate::cal::fmt::ISO;
use crate::duration::Duration;
use crate::instant::Instant;
use crate::period::Period;
use crate::util::RangeExt;


/// The largest offset from UTC, in either direction, in seconds.
const MAX_SECONDS: i32 = 18 * 60 * 60;


/// A **zone offset** is a fixed amount of time that a place’s clocks are
/// ahead of (or behind) UTC, between −18:00 and +18:00.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct ZoneOffset {
    total_seconds: i32,
}

impl ZoneOffset {

    /// The offset of UTC itself.
    pub const UTC: ZoneOffset = ZoneOffset { total_seconds: 0 };

    pub fn of_total_seconds(seconds: i32) -> Result<Self, Error> {
        if seconds.is_within(-MAX_SECONDS .. MAX_SECONDS + 1) {
            Ok(Self { total_seconds: seconds })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Builds an offset from its components, which must all share the
    /// same sign (a zero component goes with either).
    ///
    /// ```rust
    /// use datetime_functions::ZoneOffset;
    ///
    /// assert_eq!(ZoneOffset::of_hours_minutes_seconds(-3, -45, 0).unwrap().total_seconds(), -13_500);
    /// assert!(ZoneOffset::of_hours_minutes_seconds(-4, 30, 0).is_err());
    /// ```
    pub fn of_hours_minutes_seconds(hours: i32, minutes: i32, seconds: i32) -> Result<Self, Error> {
        let signs = [hours.signum(), minutes.signum(), seconds.signum()];
        if signs.contains(&1) && signs.contains(&-1) {
            Err(Error::SignMismatch)
        }
        else if ! hours.is_within(-18 .. 19) || ! minutes.is_within(-59 .. 60) || ! seconds.is_within(-59 .. 60) {
            Err(Error::OutOfRange)
        }
        else {
            Self::of_total_seconds(hours * (60 * 60) + minutes * 60 + seconds)
        }
    }

    pub fn total_seconds(self) -> i32 {
        self.total_seconds
    }

    pub fn is_utc(self) -> bool {
        self.total_seconds == 0
    }

    pub fn is_negative(self) -> bool {
        self.total_seconds < 0
    }

    pub fn hours(self) -> i8 {
        (self.total_seconds / 60 / 60) as i8
    }

    pub fn minutes(self) -> i8 {
        (self.total_seconds / 60 % 60) as i8
    }

    pub fn seconds(self) -> i8 {
        (self.total_seconds % 60) as i8
    }

    /// Pairs a local date-time with this offset.
    pub fn transform_date(self, local: LocalDateTime) -> OffsetDateTime {
        OffsetDateTime {
            local,
            offset: self,
        }
    }
}

impl fmt::Debug for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ZoneOffset({})", self.iso())
    }
}


/// An **offset date-time** is a local date-time, together with the offset
/// from UTC that was in effect there. It identifies a single instant.
///
/// Equality compares both the local part and the offset, so the same
/// instant seen from two different offsets is *not* equal; use
/// `is_equal` (or `to_instant`) to compare instants.
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct OffsetDateTime {
    pub local: LocalDateTime,
    pub offset: ZoneOffset,
}

impl OffsetDateTime {

    pub fn new(local: LocalDateTime, offset: ZoneOffset) -> Self {
        Self { local, offset }
    }

    pub fn of(date: LocalDate, time: LocalTime, offset: ZoneOffset) -> Self {
        Self { local: LocalDateTime::new(date, time), offset }
    }

    /// The date-time observed at the given instant by a clock at the
    /// given offset.
    pub fn of_instant(instant: Instant, offset: ZoneOffset) -> Result<Self, Error> {
        let local = LocalDateTime::at_epoch_second(instant.seconds(), instant.nanos(), offset)?;
        Ok(Self { local, offset })
    }

    pub fn to_epoch_second(&self) -> i64 {
        self.local.to_epoch_second(self.offset)
    }

    pub fn to_instant(&self) -> Result<Instant, Error> {
        Instant::of_epoch_second(self.to_epoch_second(), self.local.nanosecond() as i64)
    }

    fn compare_instants(&self, other: &Self) -> Ordering {
        self.to_epoch_second().cmp(&other.to_epoch_second())
            .then(self.local.nanosecond().cmp(&other.local.nanosecond()))
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.compare_instants(other) == Ordering::Less
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.compare_instants(other) == Ordering::Greater
    }

    /// Whether both values denote the same instant, whatever their offsets.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.compare_instants(other) == Ordering::Equal
    }

    fn with_local(self, local: LocalDateTime) -> Self {
        Self { local, offset: self.offset }
    }

    pub fn plus(self, period: Period) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus(period)?))
    }

    pub fn minus(self, period: Period) -> Result<Self, Error> {
        Ok(self.with_local(self.local.minus(period)?))
    }

    pub fn plus_duration(self, duration: Duration) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_duration(duration)?))
    }

    pub fn minus_duration(self, duration: Duration) -> Result<Self, Error> {
        Ok(self.with_local(self.local.minus_duration(duration)?))
    }

    pub fn plus_years(self, years: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_years(years)?))
    }

    pub fn plus_months(self, months: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_months(months)?))
    }

    pub fn plus_days(self, days: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_days(days)?))
    }

    pub fn plus_hours(self, hours: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_hours(hours)?))
    }

    pub fn plus_minutes(self, minutes: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_minutes(minutes)?))
    }

    pub fn plus_seconds(self, seconds: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_seconds(seconds)?))
    }

    pub fn plus_nanos(self, nanos: i64) -> Result<Self, Error> {
        Ok(self.with_local(self.local.plus_nanos(nanos)?))
    }
}

impl DatePiece for OffsetDateTime {
    fn year(&self) -> i64 { self.local.year() }
    fn month(&self) -> Month { self.local.month() }
    fn day(&self) -> i8 { self.local.day() }
    fn yearday(&self) -> i16 { self.local.yearday() }
    fn weekday(&self) -> Weekday { self.local.weekday() }
}

impl TimePiece for OffsetDateTime {
    fn hour(&self) -> i8 { self.local.hour() }
    fn minute(&self) -> i8 { self.local.minute() }
    fn second(&self) -> i8 { self.local.second() }
    fn nanosecond(&self) -> i32 { self.local.nanosecond() }
}

impl fmt::Debug for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OffsetDateTime({})", self.iso())
    }
}
