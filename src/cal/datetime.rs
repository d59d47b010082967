//! Dates, times, datetimes, months, and weekdays.

use std::cmp::{min, Ordering};
use std::fmt;
use std::ops::Deref;

use thiserror::Error;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::fmt::ISO;
use crate::cal::offset::ZoneOffset;
use crate::duration::Duration;
use crate::period::Period;
use crate::util::{split_cycles, RangeExt};

use self::Month::*;
use self::Weekday::*;


/// The earliest year a `LocalDate` can represent.
pub const MIN_YEAR: i64 = -999_999_999;

/// The latest year a `LocalDate` can represent.
pub const MAX_YEAR: i64 = 999_999_999;


/// A single year.
///
/// This is just a wrapper around `i64` that performs year-related tests.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Year(pub i64);

impl Year {

    /// Returns whether this year is a leap year.
    ///
    /// ### Examples
    ///
    /// ```
    /// use datetime_functions::Year;
    ///
    /// assert_eq!(Year(2000).is_leap_year(), true);
    /// assert_eq!(Year(1900).is_leap_year(), false);
    /// ```
    pub fn is_leap_year(self) -> bool {
        self.leap_year_calculations().1
    }

    /// Returns the number of days in this year.
    pub fn length(self) -> i16 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// Performs two related calculations for leap years, returning the
    /// results as a two-part tuple:
    ///
    /// 1. The number of leap years that have elapsed prior to this year;
    /// 2. Whether this year is a leap year or not.
    fn leap_year_calculations(self) -> (i64, bool) {
        let year = self.0 - 2000;

        // This calculation is the reverse of LocalDate::from_days_since_epoch.
        let (num_400y_cycles, mut remainder) = split_cycles(year, 400);

        // Standard leap-year calculations, performed on the remainder
        let currently_leap_year = remainder == 0 || (remainder % 100 != 0 && remainder % 4 == 0);

        let num_100y_cycles = remainder / 100;
        remainder -= num_100y_cycles * 100;

        let leap_years_elapsed = remainder / 4
            + 97 * num_400y_cycles  // There are 97 leap years in 400 years
            + 24 * num_100y_cycles  // There are 24 leap years in 100 years
            - if currently_leap_year { 1 } else { 0 };

        (leap_years_elapsed, currently_leap_year)
    }
}

impl Deref for Year {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


static MONTHS: [Month; 12] = [
    January,  February,  March,
    April,    May,       June,
    July,     August,    September,
    October,  November,  December,
];

static WEEKDAYS: [Weekday; 7] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];


/// Number of days guaranteed to be in four years.
const DAYS_IN_4Y:   i64 = 365 *   4 +  1;

/// Number of days guaranteed to be in a hundred years.
const DAYS_IN_100Y: i64 = 365 * 100 + 24;

/// Number of days guaranteed to be in four hundred years.
const DAYS_IN_400Y: i64 = 365 * 400 + 97;

/// Number of seconds in a day. As everywhere in this library, leap seconds
/// are simply ignored.
pub(crate) const SECONDS_IN_DAY: i64 = 86400;

pub(crate) const NANOS_IN_SECOND: i64 = 1_000_000_000;

pub(crate) const NANOS_IN_DAY: i64 = SECONDS_IN_DAY * NANOS_IN_SECOND;

/// Epoch days of the first day of `MIN_YEAR` and the last day of
/// `MAX_YEAR`, counted from 1970-01-01.
const MIN_EPOCH_DAY: i64 = -365_243_219_162;
const MAX_EPOCH_DAY: i64 =  365_241_780_471;


/// Number of days between  **1st January, 1970** and **1st March, 2000**.
///
/// This might seem like an odd number to calculate, instead of using the
/// 1st of January as a reference point, but it turns out that by having the
/// reference point immediately after a possible leap-year day, the maths
/// needed to calculate the day/week/month of an instant comes out a *lot*
/// simpler!
///
/// The Gregorian calendar operates on a 400-year cycle, so the combination
/// of having it on a year that’s a multiple of 400, and having the leap
/// day at the very end of one of these cycles, means that the calculations
/// are reduced to simple division (of course, with a bit of date-shifting
/// to base a date around this reference point).
///
/// Many people assume the epoch to be midnight on the 1st January 1970,
/// so this value (and any functions that depend on it) aren’t exposed to
/// users of this library: `LocalDate::from_epoch_day` and
/// `LocalDate::to_epoch_day` count from 1970.
const EPOCH_DIFFERENCE: i64 = 30 * 365   // 30 years between 2000 and 1970...
                            + 7          // plus seven days for leap years...
                            + 31 + 29;   // plus all the days in January and February in 2000.


/// This rather strange triangle is an array of the number of days elapsed
/// at the end of each month, starting at the beginning of March (the first
/// month after the EPOCH above), going backwards, ignoring February.
const TIME_TRIANGLE: &[i64; 11] =
    &[31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31 + 31,  // January
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,  // December
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,  // November
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,  // October
      31 + 30 + 31 + 30 + 31 + 31 + 30,  // September
      31 + 30 + 31 + 30 + 31 + 31,  // August
      31 + 30 + 31 + 30 + 31,  // July
      31 + 30 + 31 + 30,  // June
      31 + 30 + 31,  // May
      31 + 30,  // April
      31]; // March



/// A **local date** is a day-long span on the timeline, *without a time
/// zone*.
#[derive(Eq, Clone, Copy)]
pub struct LocalDate {
    ymd:     YMD,
    yearday: i16,
    weekday: Weekday,
}

/// A **local time** is a time on the timeline that recurs once a day,
/// *without a time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct LocalTime {
    hour:   i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
}

/// A **local date-time** is an exact instant on the timeline, *without a
/// time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}


impl LocalDate {

    /// Creates a new local date instance from the given year, month, and day
    /// fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an error.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use datetime_functions::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::ymd(1969, Month::July, 20).unwrap();
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), Month::July);
    /// assert_eq!(date.day(), 20);
    ///
    /// assert!(LocalDate::ymd(2100, Month::February, 29).is_err());
    /// ```
    pub fn ymd(year: i64, month: Month, day: i8) -> Result<Self, Error> {
        if ! year.is_within(MIN_YEAR .. MAX_YEAR + 1) {
            return Err(Error::OutOfRange);
        }

        YMD { year, month, day }
            .to_days_since_epoch()
            .map(|days| Self::from_days_since_epoch(days - EPOCH_DIFFERENCE))
    }

    /// Creates a new local date from the number of days that have elapsed
    /// since **1st January, 1970**, which may be negative.
    ///
    /// ```rust
    /// use datetime_functions::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::from_epoch_day(18_262).unwrap();
    /// assert_eq!((date.year(), date.month(), date.day()), (2020, Month::January, 1));
    /// ```
    pub fn from_epoch_day(epoch_day: i64) -> Result<Self, Error> {
        if epoch_day.is_within(MIN_EPOCH_DAY .. MAX_EPOCH_DAY + 1) {
            Ok(Self::from_days_since_epoch(epoch_day - EPOCH_DIFFERENCE))
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Returns the number of days that have elapsed since **1st January,
    /// 1970**; negative for earlier dates.
    pub fn to_epoch_day(&self) -> i64 {
        self.ymd.days_since_epoch()
    }

    /// Computes a LocalDate - year, month, day, weekday, and yearday -
    /// given the number of days that have passed since the EPOCH.
    ///
    /// This is used by all the other constructor functions.
    fn from_days_since_epoch(days: i64) -> Self {

        // The Gregorian calendar works in 400-year cycles, which repeat
        // themselves ever after.
        //
        // This calculation works by finding the number of 400-year,
        // 100-year, and 4-year cycles, then constantly subtracting the
        // number of leftover days.
        let (num_400y_cycles, mut remainder) = split_cycles(days, DAYS_IN_400Y);

        // Calculate the numbers of 100-year cycles, 4-year cycles, and
        // leftover years, continually reducing the number of days left to
        // think about.
        let num_100y_cycles = min(remainder / DAYS_IN_100Y, 3);
        remainder -= num_100y_cycles * DAYS_IN_100Y;  // remainder is now days left in this 100-year cycle

        let num_4y_cycles = remainder / DAYS_IN_4Y;
        remainder -= num_4y_cycles * DAYS_IN_4Y;  // remainder is now days left in this 4-year cycle

        let mut years = min(remainder / 365, 3);
        remainder -= years * 365;  // remainder is now days left in this year

        // Leap year calculation goes thusly:
        //
        // 1. If the year is a multiple of 400, it’s a leap year.
        // 2. Else, if the year is a multiple of 100, it’s *not* a leap year.
        // 3. Else, if the year is a multiple of 4, it’s a leap year again!
        //
        // We already have the values for the numbers of multiples at this
        // point, and it’s safe to re-use them.
        let days_this_year =
            if years == 0 && !(num_4y_cycles == 0 && num_100y_cycles != 0) { 366 }
                                                                      else { 365 };

        // Find out which number day of the year it is.
        // The 306 here refers to the number of days in a year excluding
        // January and February (which are excluded because of the EPOCH)
        let mut day_of_year = remainder + days_this_year - 306;
        if day_of_year >= days_this_year {
            day_of_year -= days_this_year;  // wrap around for January and February
        }

        // Turn all those cycles into an actual number of years.
        years +=   4 * num_4y_cycles
               + 100 * num_100y_cycles
               + 400 * num_400y_cycles;

        // Work out the month and number of days into the month by scanning
        // the time triangle, finding the month that has the correct number
        // of days elapsed at the end of it.
        // (it’s “11 - index” below because the triangle goes backwards)
        let result = TIME_TRIANGLE.iter()
                                  .enumerate()
                                  .find(|&(_, days)| *days <= remainder);

        let (mut month, month_days) = match result {
            Some((index, days)) => (11 - index, remainder - *days),
            None => (0, remainder),  // No month found? Then it’s February.
        };

        // Need to add 2 to the month in order to compensate for the EPOCH
        // being in March.
        month += 2;

        if month >= 12 {
            years += 1;   // wrap around for January and February
            month -= 12;  // (yes, again)
        }

        // Finally, adjust the day numbers for human reasons: the first day
        // of the month is the 1st, rather than the 0th, and the year needs
        // to be adjusted relative to the EPOCH.
        Self {
            yearday: (day_of_year + 1) as i16,
            weekday: days_to_weekday(days),
            ymd: YMD {
                year:  years + 2000,
                month: MONTHS[month],
                day:   (month_days + 1) as i8,
            },
        }
    }

    /// Returns the number of days in this date’s month.
    pub fn length_of_month(&self) -> i8 {
        self.ymd.month.days_in_month(Year(self.ymd.year).is_leap_year())
    }

    /// Returns the number of days in this date’s year.
    pub fn length_of_year(&self) -> i16 {
        Year(self.ymd.year).length()
    }

    /// The number of months since year zero, used for month arithmetic.
    pub(crate) fn proleptic_month(&self) -> i64 {
        self.ymd.year * 12 + self.ymd.month.months_from_january() as i64
    }

    /// Adds a number of years, keeping the month and clamping the day to
    /// the length of the resulting month (so 29th February becomes 28th
    /// February in a non-leap year).
    pub fn plus_years(self, years: i64) -> Result<Self, Error> {
        if years == 0 {
            return Ok(self);
        }

        let year = self.ymd.year.checked_add(years).ok_or(Error::Overflow)?;
        Self::resolve_previous_valid(year, self.ymd.month, self.ymd.day)
    }

    /// Adds a number of months, clamping the day to the length of the
    /// resulting month (so 31st January plus one month is the last day of
    /// February).
    pub fn plus_months(self, months: i64) -> Result<Self, Error> {
        if months == 0 {
            return Ok(self);
        }

        let count = self.proleptic_month().checked_add(months).ok_or(Error::Overflow)?;
        let (year, month) = split_cycles(count, 12);
        Self::resolve_previous_valid(year, MONTHS[month as usize], self.ymd.day)
    }

    /// Adds a number of days.
    pub fn plus_days(self, days: i64) -> Result<Self, Error> {
        if days == 0 {
            return Ok(self);
        }

        let epoch_day = self.to_epoch_day().checked_add(days).ok_or(Error::Overflow)?;
        Self::from_epoch_day(epoch_day)
    }

    /// Adds a period: whole years alone move the year (so leap days are
    /// clamped once), otherwise the total number of months is added in one
    /// step, and then the days.
    pub fn plus(self, period: Period) -> Result<Self, Error> {
        self.add_period(period, 1)
    }

    /// Subtracts a period, mirroring `plus`.
    pub fn minus(self, period: Period) -> Result<Self, Error> {
        self.add_period(period, -1)
    }

    fn add_period(self, period: Period, sign: i64) -> Result<Self, Error> {
        let date = if period.months() == 0 {
            self.plus_years(period.years() as i64 * sign)?
        }
        else {
            self.plus_months(period.to_total_months() * sign)?
        };

        date.plus_days(period.days() as i64 * sign)
    }

    fn resolve_previous_valid(year: i64, month: Month, day: i8) -> Result<Self, Error> {
        let day = min(day, month.days_in_month(Year(year).is_leap_year()));
        Self::ymd(year, month, day)
    }
}

impl DatePiece for LocalDate {
    fn year(&self) -> i64 { self.ymd.year }
    fn month(&self) -> Month { self.ymd.month }
    fn day(&self) -> i8 { self.ymd.day }
    fn yearday(&self) -> i16 { self.yearday }
    fn weekday(&self) -> Weekday { self.weekday }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDate({})", self.iso())
    }
}

impl PartialEq for LocalDate {
    fn eq(&self, other: &Self) -> bool {
        self.ymd == other.ymd
    }
}

impl PartialOrd for LocalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ymd.cmp(&other.ymd)
    }
}


impl LocalTime {

    /// Returns the time at midnight, with all fields initialised to 0.
    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0, second: 0, nanosecond: 0 }
    }

    /// Creates a new timestamp instance with the given hour, minute, and
    /// second fields. The nanosecond field is set to 0.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`.
    pub fn hms(hour: i8, minute: i8, second: i8) -> Result<Self, Error> {
        Self::hms_ns(hour, minute, second, 0)
    }

    /// Creates a new timestamp instance with the given hour, minute,
    /// second, and nanosecond fields.
    ///
    /// The values are checked for validity before instantiation, and
    /// passing in values out of range will return an `Err`.
    pub fn hms_ns(hour: i8, minute: i8, second: i8, nanosecond: i32) -> Result<Self, Error> {
        if hour.is_within(0..24)   && minute.is_within(0..60)
        && second.is_within(0..60) && nanosecond.is_within(0..1_000_000_000)
        {
            Ok(Self { hour, minute, second, nanosecond })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Computes the hours, minutes, seconds, and nanoseconds, based on the
    /// number of nanoseconds that have elapsed since midnight.
    pub fn from_nanos_since_midnight(nanos: i64) -> Result<Self, Error> {
        if ! nanos.is_within(0 .. NANOS_IN_DAY) {
            return Err(Error::OutOfRange);
        }

        let seconds = nanos / NANOS_IN_SECOND;
        Ok(Self {
            hour:   (seconds / 60 / 60) as i8,
            minute: (seconds / 60 % 60) as i8,
            second: (seconds % 60) as i8,
            nanosecond: (nanos % NANOS_IN_SECOND) as i32,
        })
    }

    /// Calculate the number of seconds since midnight this time is at,
    /// ignoring nanoseconds.
    pub fn to_seconds(self) -> i64 {
        self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
    }

    /// Calculate the number of nanoseconds since midnight this time is at.
    pub fn to_nanos(self) -> i64 {
        self.to_seconds() * NANOS_IN_SECOND + self.nanosecond as i64
    }

    /// Adds hours, wrapping around midnight.
    pub fn plus_hours(self, hours: i64) -> Self {
        self.wrapped((hours % 24) * 3600 * NANOS_IN_SECOND)
    }

    /// Adds minutes, wrapping around midnight.
    pub fn plus_minutes(self, minutes: i64) -> Self {
        self.wrapped((minutes % (24 * 60)) * 60 * NANOS_IN_SECOND)
    }

    /// Adds seconds, wrapping around midnight.
    pub fn plus_seconds(self, seconds: i64) -> Self {
        self.wrapped((seconds % SECONDS_IN_DAY) * NANOS_IN_SECOND)
    }

    /// Adds nanoseconds, wrapping around midnight.
    pub fn plus_nanos(self, nanos: i64) -> Self {
        self.wrapped(nanos % NANOS_IN_DAY)
    }

    /// Adds a duration, wrapping around midnight.
    pub fn plus(self, duration: Duration) -> Self {
        self.plus_seconds(duration.seconds()).plus_nanos(duration.nanos() as i64)
    }

    /// Subtracts a duration, wrapping around midnight.
    pub fn minus(self, duration: Duration) -> Self {
        self.wrapped(-((duration.seconds() % SECONDS_IN_DAY) * NANOS_IN_SECOND))
            .wrapped(-(duration.nanos() as i64))
    }

    /// Shifts this time by fewer than a day’s worth of nanoseconds in
    /// either direction.
    fn wrapped(self, delta: i64) -> Self {
        let nanos = (self.to_nanos() + delta).rem_euclid(NANOS_IN_DAY);
        Self::from_nanos(nanos)
    }

    /// Like `from_nanos_since_midnight`, for values already known to be
    /// within the day.
    fn from_nanos(nanos: i64) -> Self {
        let seconds = nanos / NANOS_IN_SECOND;
        Self {
            hour:   (seconds / 60 / 60) as i8,
            minute: (seconds / 60 % 60) as i8,
            second: (seconds % 60) as i8,
            nanosecond: (nanos % NANOS_IN_SECOND) as i32,
        }
    }
}

impl TimePiece for LocalTime {
    fn hour(&self) -> i8 { self.hour }
    fn minute(&self) -> i8 { self.minute }
    fn second(&self) -> i8 { self.second }
    fn nanosecond(&self) -> i32 { self.nanosecond }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalTime({})", self.iso())
    }
}


impl LocalDateTime {

    /// Creates a new local date time from a local date and a local time.
    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        Self {
            date,
            time,
        }
    }

    /// Computes the local date-time observed at the given number of
    /// seconds since **midnight, 1st January, 1970 UTC**, plus a
    /// nanosecond of that second, in a place with the given offset.
    pub fn at_epoch_second(epoch_second: i64, nanosecond: i32, offset: ZoneOffset) -> Result<Self, Error> {
        if ! nanosecond.is_within(0 .. 1_000_000_000) {
            return Err(Error::OutOfRange);
        }

        let local_second = epoch_second.checked_add(offset.total_seconds() as i64)
                                       .ok_or(Error::Overflow)?;

        // Just split the input value into days and seconds, and let
        // LocalDate and LocalTime do all the hard work.
        let (days, secs) = split_cycles(local_second, SECONDS_IN_DAY);

        Ok(Self {
            date: LocalDate::from_epoch_day(days)?,
            time: LocalTime::from_nanos(secs * NANOS_IN_SECOND + nanosecond as i64),
        })
    }

    /// Returns the number of seconds since **midnight, 1st January, 1970
    /// UTC** at which this date-time is observed in a place with the given
    /// offset.
    pub fn to_epoch_second(&self, offset: ZoneOffset) -> i64 {
        self.date.to_epoch_day() * SECONDS_IN_DAY
            + self.time.to_seconds()
            - offset.total_seconds() as i64
    }

    /// Returns the date portion of this date-time stamp.
    pub fn date(&self) -> LocalDate {
        self.date
    }

    /// Returns the time portion of this date-time stamp.
    pub fn time(&self) -> LocalTime {
        self.time
    }

    fn with_date(self, date: LocalDate) -> Self {
        Self { date, time: self.time }
    }

    pub fn plus_years(self, years: i64) -> Result<Self, Error> {
        Ok(self.with_date(self.date.plus_years(years)?))
    }

    pub fn plus_months(self, months: i64) -> Result<Self, Error> {
        Ok(self.with_date(self.date.plus_months(months)?))
    }

    pub fn plus_days(self, days: i64) -> Result<Self, Error> {
        Ok(self.with_date(self.date.plus_days(days)?))
    }

    pub fn plus_hours(self, hours: i64) -> Result<Self, Error> {
        self.plus_total_nanos(hours as i128 * 3600 * NANOS_IN_SECOND as i128)
    }

    pub fn plus_minutes(self, minutes: i64) -> Result<Self, Error> {
        self.plus_total_nanos(minutes as i128 * 60 * NANOS_IN_SECOND as i128)
    }

    pub fn plus_seconds(self, seconds: i64) -> Result<Self, Error> {
        self.plus_total_nanos(seconds as i128 * NANOS_IN_SECOND as i128)
    }

    pub fn plus_nanos(self, nanos: i64) -> Result<Self, Error> {
        self.plus_total_nanos(nanos as i128)
    }

    /// Adds a period to the date part, leaving the time untouched.
    pub fn plus(self, period: Period) -> Result<Self, Error> {
        Ok(self.with_date(self.date.plus(period)?))
    }

    /// Subtracts a period from the date part, leaving the time untouched.
    pub fn minus(self, period: Period) -> Result<Self, Error> {
        Ok(self.with_date(self.date.minus(period)?))
    }

    /// Adds an exact duration, carrying whole days into the date.
    pub fn plus_duration(self, duration: Duration) -> Result<Self, Error> {
        self.plus_total_nanos(duration.total_nanos())
    }

    /// Subtracts an exact duration, borrowing whole days from the date.
    pub fn minus_duration(self, duration: Duration) -> Result<Self, Error> {
        self.plus_total_nanos(-duration.total_nanos())
    }

    fn plus_total_nanos(self, nanos: i128) -> Result<Self, Error> {
        if nanos == 0 {
            return Ok(self);
        }

        let total = nanos + self.time.to_nanos() as i128;
        let days = total.div_euclid(NANOS_IN_DAY as i128);
        let time = LocalTime::from_nanos(total.rem_euclid(NANOS_IN_DAY as i128) as i64);
        let days = i64::try_from(days).map_err(|_| Error::Overflow)?;

        Ok(Self {
            date: self.date.plus_days(days)?,
            time,
        })
    }
}

impl DatePiece for LocalDateTime {
    fn year(&self) -> i64 { self.date.ymd.year }
    fn month(&self) -> Month { self.date.ymd.month }
    fn day(&self) -> i8 { self.date.ymd.day }
    fn yearday(&self) -> i16 { self.date.yearday }
    fn weekday(&self) -> Weekday { self.date.weekday }
}

impl TimePiece for LocalDateTime {
    fn hour(&self) -> i8 { self.time.hour }
    fn minute(&self) -> i8 { self.time.minute }
    fn second(&self) -> i8 { self.time.second }
    fn nanosecond(&self) -> i32 { self.time.nanosecond }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalDateTime({})", self.iso())
    }
}


/// A **YMD** is an implementation detail of `LocalDate`. It provides
/// helper methods relating to the construction of `LocalDate` instances.
///
/// The main difference is that while all `LocalDate` values get checked
/// for validity before they are used, there is no such check for `YMD`.
/// The interface to `LocalDate` ensures that it should be impossible to
/// create an instance of the 74th of March, for example, but you’re
/// free to create such an instance of `YMD`. For this reason, it is not
/// exposed to implementors of this library.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Debug, Copy)]
struct YMD {
    year:    i64,
    month:   Month,
    day:     i8,
}

impl YMD {

    /// Calculates the number of days that have elapsed since the 1st
    /// January, 1970. Returns the number of days if this datestamp is
    /// valid; an error otherwise.
    fn to_days_since_epoch(&self) -> Result<i64, Error> {
        if self.is_valid(Year(self.year).is_leap_year()) {
            Ok(self.days_since_epoch())
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// The same calculation, without the validity check.
    fn days_since_epoch(&self) -> i64 {
        let years = self.year - 2000;
        let (leap_days_elapsed, is_leap_year) = Year(self.year).leap_year_calculations();

        // Work out the number of days from the start of 1970 to now,
        // which is a multiple of the number of years...
        years * 365

            // Plus the number of days between the start of 2000 and the
            // start of 1970, to make up the difference because our
            // dates start at 2000 and instants start at 1970...
            + 10958

            // Plus the number of leap years that have elapsed between
            // now and the start of 2000...
            + leap_days_elapsed

            // Plus the number of days in all the months leading up to
            // the current month...
            + self.month.days_before_start() as i64

            // Plus an extra leap day for *this* year...
            + if is_leap_year && self.month >= March { 1 } else { 0 }

            // Plus the number of days in the month so far! (Days are
            // 1-indexed, so we make them 0-indexed here)
            + (self.day - 1) as i64
    }

    /// Returns whether this datestamp is valid, which basically means
    /// whether the day is in the range allowed by the month.
    fn is_valid(&self, is_leap_year: bool) -> bool {
        self.day >= 1 && self.day <= self.month.days_in_month(is_leap_year)
    }
}

/// Computes the weekday, given the number of days that have passed
/// since the EPOCH.
fn days_to_weekday(days: i64) -> Weekday {
    // March 1st, 2000 was a Wednesday, so add 3 to the number of days.
    WEEKDAYS[(days + 3).rem_euclid(7) as usize]
}


/// A value couldn’t be built, or an arithmetic result doesn’t fit.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Error)]
pub enum Error {

    /// A field, or a computed value, is outside its valid range.
    #[error("datetime field out of range")]
    OutOfRange,

    /// Components of one value were given with different signs.
    #[error("sign mismatch")]
    SignMismatch,

    /// An intermediate result overflowed its integer type.
    #[error("numeric overflow")]
    Overflow,

    /// An attempt to divide by zero.
    #[error("division by zero")]
    DivisionByZero,
}


/// A month of the year, starting with January, and ending with December.
///
/// This is stored as an enum instead of just a number to prevent
/// off-by-one errors: is month 2 February (1-indexed) or March (0-indexed)?
/// In this case, it’s 1-indexed, to have January become 1 when you use
/// `as i32` in code.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Month {
    January =  1, February =  2, March     =  3,
    April   =  4, May      =  5, June      =  6,
    July    =  7, August   =  8, September =  9,
    October = 10, November = 11, December  = 12,
}

#[allow(clippy::match_same_arms)]
impl Month {

    /// Returns the number of days in this month, depending on whether it’s
    /// a leap year or not.
    pub fn days_in_month(self, leap_year: bool) -> i8 {
        match self {
            January   => 31, February  => if leap_year { 29 } else { 28 },
            March     => 31, April     => 30,
            May       => 31, June      => 30,
            July      => 31, August    => 31,
            September => 30, October   => 31,
            November  => 30, December  => 31,
        }
    }

    /// Returns the number of days that have elapsed in a year *before* this
    /// month begins, with no leap year check.
    fn days_before_start(self) -> i16 {
        match self {
            January =>   0, February =>  31, March     =>  59,
            April   =>  90, May      => 120, June      => 151,
            July    => 181, August   => 212, September => 243,
            October => 273, November => 304, December  => 334,
        }
    }

    pub fn months_from_january(self) -> usize {
        self as usize - 1
    }

    /// Returns the month based on a number, with January as **Month 1**,
    /// February as **Month 2**, and so on.
    ///
    /// ```rust
    /// use datetime_functions::Month;
    /// assert_eq!(Month::from_one(5), Ok(Month::May));
    /// assert!(Month::from_one(0).is_err());
    /// ```
    pub fn from_one(month: i8) -> Result<Self, Error> {
        if month.is_within(1..13) {
            Ok(MONTHS[month as usize - 1])
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Returns the month based on a number, with January as **Month 0**,
    /// February as **Month 1**, and so on.
    ///
    /// ```rust
    /// use datetime_functions::Month;
    /// assert_eq!(Month::from_zero(5), Ok(Month::June));
    /// assert!(Month::from_zero(12).is_err());
    /// ```
    pub fn from_zero(month: i8) -> Result<Self, Error> {
        if month.is_within(0..12) {
            Ok(MONTHS[month as usize])
        }
        else {
            Err(Error::OutOfRange)
        }
    }
}


/// A named day of the week.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Weekday {
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
}

// Sunday is Day 0, to line up with the day-name tables of the locale used
// for formatting.
//
// Weekdays have no Ord instance because there’s no real standard as to
// whether Sunday should come before Monday, or the other way around. The
// field is ignored when comparing LocalDates anyway.

impl Weekday {
    /// Return the weekday based on a number, with Sunday as Day 0, Monday as
    /// Day 1, and so on.
    ///
    /// ```rust
    /// use datetime_functions::Weekday;
    /// assert_eq!(Weekday::from_zero(4), Ok(Weekday::Thursday));
    /// assert!(Weekday::from_zero(7).is_err());
    /// ```
    pub fn from_zero(weekday: i8) -> Result<Self, Error> {
        if weekday.is_within(0..7) {
            Ok(WEEKDAYS[weekday as usize])
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Return the weekday based on a number, with Monday as Day 1 and
    /// Sunday as Day 7.
    pub fn from_one(weekday: i8) -> Result<Self, Error> {
        match weekday {
            7 => Ok(Sunday),
            _ if weekday.is_within(1..7) => Self::from_zero(weekday),
            _ => Err(Error::OutOfRange),
        }
    }
}


/// Misc tests that don’t seem to fit anywhere.
#[cfg(test)]
mod test {
    pub(crate) use super::{LocalDateTime, LocalDate, LocalTime, Month, Weekday};
    use super::{MIN_YEAR, MAX_YEAR, MIN_EPOCH_DAY, MAX_EPOCH_DAY, EPOCH_DIFFERENCE};
    pub(crate) use crate::cal::{DatePiece, TimePiece, ZoneOffset};


    #[test]
    fn some_leap_years() {
        for year in [2004,2008,2012,2016].iter() {
            assert!(LocalDate::ymd(*year, Month::February, 29).is_ok());
            assert!(LocalDate::ymd(*year + 1, Month::February, 29).is_err());
        }
        assert!(LocalDate::ymd(1600,Month::February,29).is_ok());
        assert!(LocalDate::ymd(1601,Month::February,29).is_err());
        assert!(LocalDate::ymd(1602,Month::February,29).is_err());
    }

    #[test]
    fn new() {
        for year in 1..3000 {
            for (month, bad_day) in [(1, 32), (2, 30), (3, 32), (4, 31), (5, 32), (6, 31),
                                     (7, 32), (8, 32), (9, 31), (10, 32), (11, 31), (12, 32)] {
                assert!(LocalDate::ymd(year, Month::from_one(month).unwrap(), bad_day).is_err());
            }
        }
    }

    #[test]
    fn to_from_days_since_epoch() {
        for date in  vec![
            LocalDate::ymd(1970, Month::January,   1).unwrap(),
            LocalDate::ymd(   1, Month::January,   1).unwrap(),
            LocalDate::ymd(1971, Month::January,   1).unwrap(),
            LocalDate::ymd(1973, Month::January,   1).unwrap(),
            LocalDate::ymd(1977, Month::January,   1).unwrap(),
            LocalDate::ymd(1989, Month::November, 10).unwrap(),
            LocalDate::ymd(1990, Month::July,      8).unwrap(),
            LocalDate::ymd(2014, Month::July,     13).unwrap(),
            LocalDate::ymd(2001, Month::February,  3).unwrap(),
        ]{
            assert_eq!(date, LocalDate::from_days_since_epoch(date.to_epoch_day() - EPOCH_DIFFERENCE));
            assert_eq!(date, LocalDate::from_epoch_day(date.to_epoch_day()).unwrap());
        }
    }

    #[test]
    fn year_limits() {
        let first = LocalDate::ymd(MIN_YEAR, Month::January, 1).unwrap();
        let last = LocalDate::ymd(MAX_YEAR, Month::December, 31).unwrap();
        assert_eq!(first.to_epoch_day(), MIN_EPOCH_DAY);
        assert_eq!(last.to_epoch_day(), MAX_EPOCH_DAY);

        assert!(LocalDate::ymd(MAX_YEAR + 1, Month::January, 1).is_err());
        assert!(LocalDate::from_epoch_day(MIN_EPOCH_DAY - 1).is_err());
        assert!(last.plus_days(1).is_err());
    }

    #[test]
    fn weekday_of_epoch() {
        let date = LocalDate::from_epoch_day(0).unwrap();
        assert_eq!(date.weekday(), Weekday::Thursday);

        let date = LocalDate::from_epoch_day(-1).unwrap();
        assert_eq!(date.weekday(), Weekday::Wednesday);
    }

    mod months {
        use super::*;

        #[test]
        fn clamps_to_end_of_month() {
            let date = LocalDate::ymd(2020, Month::January, 31).unwrap();
            assert_eq!(date.plus_months(1), LocalDate::ymd(2020, Month::February, 29));
            assert_eq!(date.plus_months(13), LocalDate::ymd(2021, Month::February, 28));
        }

        #[test]
        fn backwards_across_years() {
            let date = LocalDate::ymd(2020, Month::March, 15).unwrap();
            assert_eq!(date.plus_months(-15), LocalDate::ymd(2018, Month::December, 15));
        }

        #[test]
        fn leap_day_plus_a_year() {
            let date = LocalDate::ymd(2020, Month::February, 29).unwrap();
            assert_eq!(date.plus_years(1), LocalDate::ymd(2021, Month::February, 28));
            assert_eq!(date.plus_years(4), LocalDate::ymd(2024, Month::February, 29));
        }
    }

    mod times {
        use super::*;

        #[test]
        fn wraps_past_midnight() {
            let time = LocalTime::hms(23, 30, 0).unwrap();
            assert_eq!(time.plus_hours(1), LocalTime::hms(0, 30, 0).unwrap());
            assert_eq!(time.plus_minutes(-24 * 60 - 30), LocalTime::hms(23, 0, 0).unwrap());
        }

        #[test]
        fn nanos_borrow() {
            let time = LocalTime::midnight();
            assert_eq!(time.plus_nanos(-1), LocalTime::hms_ns(23, 59, 59, 999_999_999).unwrap());
        }

        #[test]
        fn out_of_range() {
            assert!(LocalTime::hms(24, 0, 0).is_err());
            assert!(LocalTime::hms_ns(0, 0, 0, 1_000_000_000).is_err());
            assert!(LocalTime::from_nanos_since_midnight(-1).is_err());
        }
    }

    mod datetimes {
        use super::*;

        #[test]
        fn carries_into_the_date() {
            let then = LocalDateTime::new(
                        LocalDate::ymd(2020, Month::December, 31).unwrap(),
                        LocalTime::hms(23, 0, 0).unwrap());

            let later = then.plus_minutes(90).unwrap();
            assert_eq!(later.date(), LocalDate::ymd(2021, Month::January, 1).unwrap());
            assert_eq!(later.time(), LocalTime::hms(0, 30, 0).unwrap());
        }

        #[test]
        fn epoch_seconds() {
            let utc = ZoneOffset::UTC;
            let then = LocalDateTime::at_epoch_second(1_234_567_890, 0, utc).unwrap();
            assert_eq!(then.year(), 2009);
            assert_eq!(then.hour(), 23);
            assert_eq!(then.to_epoch_second(utc), 1_234_567_890);

            let before = LocalDateTime::at_epoch_second(-1, 500, utc).unwrap();
            assert_eq!(before.date(), LocalDate::ymd(1969, Month::December, 31).unwrap());
            assert_eq!(before.time(), LocalTime::hms_ns(23, 59, 59, 500).unwrap());
        }
    }

    mod debug {
        use super::*;

        #[test]
        fn recently() {
            let date = LocalDate::ymd(1600, Month::February, 28).unwrap();
            let debugged = format!("{:?}", date);

            assert_eq!(debugged, "LocalDate(1600-02-28)");
        }

        #[test]
        fn just_then() {
            let date = LocalDate::ymd(-753, Month::December, 1).unwrap();
            let debugged = format!("{:?}", date);

            assert_eq!(debugged, "LocalDate(-0753-12-01)");
        }

        #[test]
        fn far_far_future() {
            let date = LocalDate::ymd(10601, Month::January, 31).unwrap();
            let debugged = format!("{:?}", date);

            assert_eq!(debugged, "LocalDate(+10601-01-31)");
        }

        #[test]
        fn midday() {
            let time = LocalTime::hms(12, 0, 0).unwrap();
            let debugged = format!("{:?}", time);

            assert_eq!(debugged, "LocalTime(12:00:00)");
        }

        #[test]
        fn ascending() {
            let then = LocalDateTime::new(
                        LocalDate::ymd(2009, Month::February, 13).unwrap(),
                        LocalTime::hms_ns(23, 31, 30, 120_000_000).unwrap());
            let debugged = format!("{:?}", then);

            assert_eq!(debugged, "LocalDateTime(2009-02-13T23:31:30.12)");
        }
    }
}
