//! Datetimes with a variable UTC offset, and time zone calculations.
//!
//! The zone rules themselves come from the IANA database as compiled into
//! `chrono-tz`; this module only asks it which offset is in force at a
//! given instant, and works out everything else from that.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::datetime::{Error, LocalDateTime, Month, Weekday, SECONDS_IN_DAY};
use crate::cal::fmt::ISO;
use crate::cal::offset::{OffsetDateTime, ZoneOffset};
use crate::duration::Duration;
use crate::instant::Instant;
use crate::period::Period;


/// A **zone ID** names a geographical region whose clocks follow a common
/// set of rules, such as “Europe/Paris”.
///
/// Only region identifiers are accepted: a fixed offset written as a zone
/// (“Z”, “+02:00”, “UTC+01:00”, and so on) is a `ZoneOffset`, not a zone.
#[derive(PartialEq, Eq, Hash, Copy, Clone)]
pub struct ZoneId {
    tz: Tz,
}

/// Why a string couldn’t become a `ZoneId`.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum ZoneError {

    /// The string is a fixed offset rather than a region.
    #[error("'{0}' is an offset, not a zone region")]
    OffsetForm(String),

    /// No region with this name is known.
    #[error("unknown zone region '{0}'")]
    UnknownRegion(String),
}

impl ZoneId {

    /// The region identifier, exactly as it was given.
    pub fn id(&self) -> &'static str {
        self.tz.name()
    }

    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// The offset in force in this zone at the given number of seconds
    /// since the Unix epoch.
    ///
    /// Instants beyond the range of the rules database use the offset at
    /// the nearest end of that range.
    pub fn offset_at(&self, epoch_second: i64) -> ZoneOffset {
        let min = NaiveDateTime::MIN.and_utc().timestamp();
        let max = NaiveDateTime::MAX.and_utc().timestamp();

        let naive = DateTime::from_timestamp(epoch_second.clamp(min, max), 0)
                             .map_or(NaiveDateTime::MIN, |dt| dt.naive_utc());

        let seconds = self.tz.offset_from_utc_datetime(&naive).fix().local_minus_utc();
        ZoneOffset::of_total_seconds(seconds).unwrap_or(ZoneOffset::UTC)
    }

    /// Works out which offsets a wall clock in this zone could have been
    /// using when it showed the given local date-time.
    pub fn local_times(&self, local: LocalDateTime) -> LocalTimes {
        let as_utc = local.to_epoch_second(ZoneOffset::UTC);

        // Transitions are months apart, so a day either side is enough to
        // find the offsets on both sides of any change near this time.
        let before = self.offset_at(as_utc - SECONDS_IN_DAY);
        let after  = self.offset_at(as_utc + SECONDS_IN_DAY);

        let mut valid = Vec::with_capacity(2);
        for candidate in [before, after, self.offset_at(as_utc - before.total_seconds() as i64), self.offset_at(as_utc - after.total_seconds() as i64)] {
            if ! valid.contains(&candidate) && self.offset_at(as_utc - candidate.total_seconds() as i64) == candidate {
                valid.push(candidate);
            }
        }

        // Higher offsets reach a given wall-clock time earlier.
        valid.sort_by(|a, b| b.cmp(a));

        match valid[..] {
            []                  => LocalTimes::Impossible { before: before.min(after), after: before.max(after) },
            [precise]           => LocalTimes::Precise(precise),
            [earlier, later, ..] => LocalTimes::Ambiguous { earlier, later },
        }
    }

    /// Whether the given offset is one a clock in this zone could have been
    /// using at the given local date-time.
    pub fn is_valid_offset(&self, local: LocalDateTime, offset: ZoneOffset) -> bool {
        match self.local_times(local) {
            LocalTimes::Impossible { .. }            => false,
            LocalTimes::Precise(o)                   => o == offset,
            LocalTimes::Ambiguous { earlier, later } => earlier == offset || later == offset,
        }
    }
}

impl FromStr for ZoneId {
    type Err = ZoneError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if is_offset_form(input) {
            return Err(ZoneError::OffsetForm(input.to_owned()));
        }

        input.parse::<Tz>()
             .map(|tz| Self { tz })
             .map_err(|_| ZoneError::UnknownRegion(input.to_owned()))
    }
}

/// Returns whether this string names a fixed offset: `Z`, a bare signed
/// offset, or one of the `UTC`/`GMT`/`UT` prefixes followed by a sign or
/// a digit. The bare prefixes on their own are regions.
fn is_offset_form(input: &str) -> bool {
    if input == "Z" || input.starts_with('+') || input.starts_with('-') {
        return true;
    }

    ["UTC", "GMT", "UT"].iter()
        .filter_map(|prefix| input.strip_prefix(prefix))
        .any(|rest| rest.starts_with(|c: char| c == '+' || c == '-' || c.is_ascii_digit()))
}

impl fmt::Debug for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ZoneId({})", self.id())
    }
}


/// The result of converting a *local* time to a *zoned* time with the same
/// time components. See `ZoneId::local_times` for more information.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum LocalTimes {

    /// This local time is impossible (when a time occurs between two
    /// timespans, which should never be shown on a wall clock).
    Impossible { before: ZoneOffset, after: ZoneOffset },

    /// This local time can be defined unambiguously.
    Precise(ZoneOffset),

    /// This local time is ambiguous (when a time overlaps two timespans,
    /// which happens twice on a wall clock rather than once).
    Ambiguous { earlier: ZoneOffset, later: ZoneOffset },
}


/// A **zoned date-time** is a local date-time in a particular zone, along
/// with the offset that zone was using at the time.
///
/// The offset is always one that the zone allows at that local date-time.
/// Equality compares all three parts; the `is_before`, `is_after`, and
/// `is_equal` methods compare instants.
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct ZonedDateTime {
    local: LocalDateTime,
    offset: ZoneOffset,
    zone: ZoneId,
}

impl ZonedDateTime {

    /// Places a local date-time into a zone.
    ///
    /// Local times skipped over by a transition are moved forward by the
    /// length of the gap. Local times that happen twice use the preferred
    /// offset when it is one of the two, and the earlier one otherwise.
    pub fn of_local(local: LocalDateTime, zone: ZoneId, preferred: Option<ZoneOffset>) -> Result<Self, Error> {
        match zone.local_times(local) {
            LocalTimes::Precise(offset) => {
                Ok(Self { local, offset, zone })
            }
            LocalTimes::Ambiguous { earlier, later } => {
                let offset = match preferred {
                    Some(p) if p == later => later,
                    _                     => earlier,
                };
                Ok(Self { local, offset, zone })
            }
            LocalTimes::Impossible { before, after } => {
                let gap = (after.total_seconds() - before.total_seconds()) as i64;
                let local = local.plus_seconds(gap)?;
                Ok(Self { local, offset: after, zone })
            }
        }
    }

    /// The date-time observed in the zone at the given instant.
    pub fn of_instant(instant: Instant, zone: ZoneId) -> Result<Self, Error> {
        let offset = zone.offset_at(instant.seconds());
        let local = LocalDateTime::at_epoch_second(instant.seconds(), instant.nanos(), offset)?;
        Ok(Self { local, offset, zone })
    }

    /// Checks that the three parts belong together, without resolving
    /// anything: the offset has to be one the zone allows at that local
    /// date-time.
    pub fn of_strict(local: LocalDateTime, offset: ZoneOffset, zone: ZoneId) -> Result<Self, Error> {
        if zone.is_valid_offset(local, offset) {
            Ok(Self { local, offset, zone })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    pub fn local(&self) -> LocalDateTime {
        self.local
    }

    pub fn offset(&self) -> ZoneOffset {
        self.offset
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    pub fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::new(self.local, self.offset)
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

    pub fn is_equal(&self, other: &Self) -> bool {
        self.compare_instants(other) == Ordering::Equal
    }

    fn resolve_local(self, local: LocalDateTime) -> Result<Self, Error> {
        Self::of_local(local, self.zone, Some(self.offset))
    }

    /// Adds a period on the local timeline, so that adding a day across a
    /// daylight-saving change keeps the wall-clock time.
    pub fn plus(self, period: Period) -> Result<Self, Error> {
        self.add_period(period, 1)
    }

    pub fn minus(self, period: Period) -> Result<Self, Error> {
        self.add_period(period, -1)
    }

    // The whole period lands on the local timeline before the zone gets a
    // say, so only the final date-time is checked against gaps.
    fn add_period(self, period: Period, sign: i64) -> Result<Self, Error> {
        let local = if sign < 0 { self.local.minus(period)? } else { self.local.plus(period)? };
        self.resolve_local(local)
    }

    /// Adds a duration on the instant timeline, so that adding an hour
    /// always moves an hour forward in time, whatever the clocks do.
    pub fn plus_duration(self, duration: Duration) -> Result<Self, Error> {
        Self::of_instant(self.to_instant()?.plus(duration)?, self.zone)
    }

    pub fn minus_duration(self, duration: Duration) -> Result<Self, Error> {
        Self::of_instant(self.to_instant()?.minus(duration)?, self.zone)
    }
}

impl DatePiece for ZonedDateTime {
    fn year(&self) -> i64 { self.local.year() }
    fn month(&self) -> Month { self.local.month() }
    fn day(&self) -> i8 { self.local.day() }
    fn yearday(&self) -> i16 { self.local.yearday() }
    fn weekday(&self) -> Weekday { self.local.weekday() }
}

impl TimePiece for ZonedDateTime {
    fn hour(&self) -> i8 { self.local.hour() }
    fn minute(&self) -> i8 { self.local.minute() }
    fn second(&self) -> i8 { self.local.second() }
    fn nanosecond(&self) -> i32 { self.local.nanosecond() }
}

impl fmt::Debug for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ZonedDateTime({})", self.iso())
    }
}
