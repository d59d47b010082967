//! ISO-8601 date and time calculations, which use years, months, days,
//! hours, minutes, seconds, and nanoseconds.

mod datetime;
pub mod fmt;
mod offset;
pub mod parse;
mod zone;

pub use self::datetime::{Error, LocalDate, LocalDateTime, LocalTime, Month, Weekday, Year};
pub use self::datetime::{MAX_YEAR, MIN_YEAR};
pub use self::offset::{OffsetDateTime, ZoneOffset};
pub use self::zone::{ZoneError, ZoneId, ZonedDateTime};


/// The **date piece** trait is used for date and time values that have
/// date components of years, months, and days.
pub trait DatePiece {

    /// The year, in absolute terms.
    /// This is in human-readable format, so the year 2014 actually has a
    /// year value of 2014, rather than 14 or 114 or anything like that.
    fn year(&self) -> i64;

    /// The month of the year.
    fn month(&self) -> Month;

    /// The day of the month, from 1 to 31.
    fn day(&self) -> i8;

    /// The day of the year, from 1 to 366.
    fn yearday(&self) -> i16;

    /// The day of the week.
    fn weekday(&self) -> Weekday;

    /// The number of years into the century.
    /// This is the same as the last two digits of the year, and is never
    /// negative, even for years before the common era.
    fn year_of_century(&self) -> i64 { self.year().rem_euclid(100) }
}


/// The **time piece** trait is used for date and time values that have
/// time components of hours, minutes, seconds, and nanoseconds.
pub trait TimePiece {

    /// The hour of the day.
    fn hour(&self) -> i8;

    /// The minute of the hour.
    fn minute(&self) -> i8;

    /// The second of the minute.
    fn second(&self) -> i8;

    /// The nanosecond of the second.
    fn nanosecond(&self) -> i32;
}
