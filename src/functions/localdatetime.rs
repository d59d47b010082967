//! Local date-times: a date and a time of day, without a zone.

use crate::cal::fmt::ISO;
use crate::cal::fmt::custom::Parsed;
use crate::cal::{LocalDate, LocalDateTime, LocalTime, ZoneOffset};
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::functions::args::{encoded, format_with, int, long, parse_iso, parse_with, record, scalar, text};
use crate::functions::chronology;
use crate::functions::context::Context;
use crate::functions::localdate::date_of;
use crate::functions::localtime::time_of;
use crate::functions::registry::Registry;
use crate::period::Period;
use crate::record::DataType::{self, BigInt, Boolean, Integer, Varchar};
use crate::record::schema::{DURATION, LOCALDATE, LOCALDATETIME, LOCALTIME, PERIOD};
use crate::record::Value;


/// Explicit amounts of each unit, to be added in order from years down to
/// nanoseconds.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Components {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
    pub nanos: i32,
}

impl Components {

    /// Reads the seven component arguments that follow the base value.
    pub(crate) fn from_args(args: &[Value], first: usize) -> Option<Self> {
        Some(Self {
            years:   int(args, first)?,
            months:  int(args, first + 1)?,
            days:    int(args, first + 2)?,
            hours:   int(args, first + 3)?,
            minutes: int(args, first + 4)?,
            seconds: int(args, first + 5)?,
            nanos:   int(args, first + 6)?,
        })
    }

    /// Adds each amount in turn, multiplied by the sign. Each step keeps
    /// the day within its month.
    pub(crate) fn apply(self, local: LocalDateTime, sign: i64) -> Result<LocalDateTime> {
        let local = local.plus_years(sign * self.years as i64)?
                         .plus_months(sign * self.months as i64)?
                         .plus_days(sign * self.days as i64)?
                         .plus_hours(sign * self.hours as i64)?
                         .plus_minutes(sign * self.minutes as i64)?
                         .plus_seconds(sign * self.seconds as i64)?
                         .plus_nanos(sign * self.nanos as i64)?;
        Ok(local)
    }
}


pub fn now(context: &Context) -> Result<LocalDateTime> {
    Ok(context.clock().local_now()?)
}

/// Builds a date-time out of explicit components, naming whichever one is
/// out of range.
pub fn of(year: Option<i32>, month: Option<i32>, day: Option<i32>, hour: Option<i32>, minute: Option<i32>, second: Option<i32>, nano: Option<i32>) -> Result<Option<LocalDateTime>> {
    require!(year, month, day, hour, minute, second, nano);
    Ok(Some(LocalDateTime::new(date_of(year, month, day)?, time_of(hour, minute, second, nano)?)))
}

/// The date-time in UTC at the given number of milliseconds since the
/// epoch. Milliseconds before the epoch round down, not towards zero.
pub fn of_epoch_milli(millis: Option<i64>) -> Result<Option<LocalDateTime>> {
    require!(millis);
    let seconds = millis.div_euclid(1000);
    let nanos = millis.rem_euclid(1000) as i32 * 1_000_000;

    LocalDateTime::at_epoch_second(seconds, nanos, ZoneOffset::UTC)
        .map(Some)
        .map_err(|_| Error::invalid_field("epochMillis", format!("{} is out of range", millis)))
}

pub fn of_date_time(date: Option<LocalDate>, time: Option<LocalTime>) -> Result<Option<LocalDateTime>> {
    require!(date, time);
    Ok(Some(LocalDateTime::new(date, time)))
}

pub fn parse(text: Option<&str>) -> Result<Option<LocalDateTime>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn parse_pattern(text: Option<&str>, pattern: Option<&str>) -> Result<Option<LocalDateTime>> {
    require!(text, pattern);
    parse_with(text, pattern, Parsed::to_local_date_time).map(Some)
}

/// Adds the period, then the duration.
pub fn plus(local: Option<LocalDateTime>, period: Option<Period>, duration: Option<Duration>) -> Result<Option<LocalDateTime>> {
    require!(local, period, duration);
    Ok(Some(local.plus(period)?.plus_duration(duration)?))
}

pub fn minus(local: Option<LocalDateTime>, period: Option<Period>, duration: Option<Duration>) -> Result<Option<LocalDateTime>> {
    require!(local, period, duration);
    Ok(Some(local.minus(period)?.minus_duration(duration)?))
}

pub fn plus_components(local: Option<LocalDateTime>, components: Option<Components>) -> Result<Option<LocalDateTime>> {
    require!(local, components);
    components.apply(local, 1).map(Some)
}

pub fn minus_components(local: Option<LocalDateTime>, components: Option<Components>) -> Result<Option<LocalDateTime>> {
    require!(local, components);
    components.apply(local, -1).map(Some)
}

pub fn format(local: Option<LocalDateTime>) -> Result<Option<String>> {
    require!(local);
    Ok(Some(local.iso().to_string()))
}

pub fn format_pattern(local: Option<LocalDateTime>, pattern: Option<&str>) -> Result<Option<String>> {
    require!(local, pattern);
    format_with(&local, pattern).map(Some)
}


pub(crate) fn register(registry: &mut Registry) {
    let localdatetime = DataType::Struct(&LOCALDATETIME);
    let localdate = DataType::Struct(&LOCALDATE);
    let localtime = DataType::Struct(&LOCALTIME);
    let period = DataType::Struct(&PERIOD);
    let duration = DataType::Struct(&DURATION);
    let seven = [Integer; 7];

    registry.add("dt_localdatetime", &[], localdatetime,
        "Create a LocalDateTime from the current date and time",
        |context, _| encoded(now(context).map(Some)));
    registry.add("dt_localdatetime", &seven, localdatetime,
        "Create a LocalDateTime from a year, month, day, hour, minute, second, and nanosecond",
        |_, args| encoded(of(int(args, 0), int(args, 1), int(args, 2), int(args, 3), int(args, 4), int(args, 5), int(args, 6))));
    registry.add("dt_localdatetime", &[BigInt], localdatetime,
        "Create a LocalDateTime in UTC from milliseconds since the epoch",
        |_, args| encoded(of_epoch_milli(long(args, 0))));
    registry.add("dt_localdatetime", &[localdate, localtime], localdatetime,
        "Create a LocalDateTime from a LocalDate and a LocalTime",
        |_, args| encoded(of_date_time(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_localdatetime", &[Varchar], localdatetime,
        "Create a LocalDateTime from its ISO-8601 text, such as 2011-12-03T10:15:30",
        |_, args| encoded(parse(text(args, 0))));
    registry.add("dt_localdatetime", &[Varchar, Varchar], localdatetime,
        "Create a LocalDateTime from text in the given pattern",
        |_, args| encoded(parse_pattern(text(args, 0), text(args, 1))));

    let with_components: Vec<DataType> = Some(localdatetime).into_iter().chain(seven).collect();

    registry.add("dt_localdatetime_plus", &[localdatetime, period, duration], localdatetime,
        "Add a Period and then a Duration to a LocalDateTime",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_localdatetime_plus", &with_components, localdatetime,
        "Add years, months, days, hours, minutes, seconds, and nanoseconds to a LocalDateTime",
        |_, args| encoded(plus_components(record(args, 0)?, Components::from_args(args, 1))));

    registry.add("dt_localdatetime_minus", &[localdatetime, period, duration], localdatetime,
        "Subtract a Period and then a Duration from a LocalDateTime",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_localdatetime_minus", &with_components, localdatetime,
        "Subtract years, months, days, hours, minutes, seconds, and nanoseconds from a LocalDateTime",
        |_, args| encoded(minus_components(record(args, 0)?, Components::from_args(args, 1))));

    registry.add("dt_localdatetime_format", &[localdatetime], Varchar,
        "Render a LocalDateTime as ISO-8601 text",
        |_, args| scalar(format(record(args, 0)?)));
    registry.add("dt_localdatetime_format", &[localdatetime, Varchar], Varchar,
        "Render a LocalDateTime in the given pattern",
        |_, args| scalar(format_pattern(record(args, 0)?, text(args, 1))));

    registry.add("dt_localdatetime_chronology", &[localdatetime, localdatetime, Varchar], Boolean,
        "Check whether the other LocalDateTime is before, after, or equal to the base one (IS_BEFORE, IS_AFTER, IS_EQUAL)",
        chronology::invoke::<LocalDateTime>);
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::Month;

    fn local(year: i64, month: Month, day: i8, hour: i8, minute: i8) -> LocalDateTime {
        LocalDateTime::new(LocalDate::ymd(year, month, day).unwrap(), LocalTime::hms(hour, minute, 0).unwrap())
    }

    fn components(years: i32, months: i32, days: i32, hours: i32) -> Option<Components> {
        Some(Components { years, months, days, hours, minutes: 0, seconds: 0, nanos: 0 })
    }

    #[test]
    fn millis_round_down() {
        let expected = LocalDateTime::new(LocalDate::ymd(1969, Month::December, 31).unwrap(),
                                          LocalTime::hms_ns(23, 59, 59, 999_000_000).unwrap());
        assert_eq!(of_epoch_milli(Some(-1)), Ok(Some(expected)));
    }

    #[test]
    fn hours_carry_into_days() {
        let result = plus_components(Some(local(2020, Month::December, 31, 23, 0)), components(0, 0, 0, 2));
        assert_eq!(result, Ok(Some(local(2021, Month::January, 1, 1, 0))));
    }

    #[test]
    fn month_then_day() {
        let result = minus_components(Some(local(2020, Month::March, 31, 12, 0)), components(0, 1, 1, 0));
        assert_eq!(result, Ok(Some(local(2020, Month::February, 28, 12, 0))));
    }

    #[test]
    fn period_then_duration() {
        let result = plus(Some(local(2020, Month::January, 31, 12, 0)), Some(Period::of(0, 1, 0)), Some(Duration::of_seconds(86_400)));
        assert_eq!(result, Ok(Some(local(2020, Month::March, 1, 12, 0))));
    }

    #[test]
    fn explicit_components() {
        let result = of(Some(2020), Some(2), Some(29), Some(10), Some(0), Some(0), Some(0));
        assert_eq!(result, Ok(Some(local(2020, Month::February, 29, 10, 0))));
        assert!(matches!(of(Some(2020), Some(2), Some(29), Some(10), Some(0), Some(60), Some(0)),
                         Err(Error::InvalidField { field: "second", .. })));
    }

    #[test]
    fn iso_text() {
        assert_eq!(format(Some(local(2011, Month::December, 3, 10, 15))), Ok(Some("2011-12-03T10:15:00".to_owned())));
        assert_eq!(parse(Some("2011-12-03T10:15")), Ok(Some(local(2011, Month::December, 3, 10, 15))));
    }
}
