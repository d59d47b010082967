//! Local times: times of day, without a date or a zone.

use crate::cal::LocalTime;
use crate::cal::fmt::ISO;
use crate::cal::fmt::custom::Parsed;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::functions::args::{encoded, format_with, int, parse_iso, parse_with, record, scalar, text};
use crate::functions::chronology;
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::record::DataType::{self, Boolean, Integer, Varchar};
use crate::record::schema::{DURATION, LOCALTIME};


fn checked(name: &'static str, value: i32, max: i32) -> Result<i32> {
    if (0 ..= max).contains(&value) {
        Ok(value)
    }
    else {
        Err(Error::invalid_field(name, format!("{} is outside 0 to {}", value, max)))
    }
}

/// Builds a time out of explicit arguments, naming whichever one is out
/// of range.
pub(crate) fn time_of(hour: i32, minute: i32, second: i32, nano: i32) -> Result<LocalTime> {
    let hour   = checked("hour", hour, 23)?;
    let minute = checked("minute", minute, 59)?;
    let second = checked("second", second, 59)?;
    let nano   = checked("nano", nano, 999_999_999)?;

    Ok(LocalTime::hms_ns(hour as i8, minute as i8, second as i8, nano)?)
}


pub fn now(context: &Context) -> Result<LocalTime> {
    Ok(context.clock().time_now()?)
}

pub fn of(hour: Option<i32>, minute: Option<i32>, second: Option<i32>) -> Result<Option<LocalTime>> {
    require!(hour, minute, second);
    time_of(hour, minute, second, 0).map(Some)
}

pub fn of_nano(hour: Option<i32>, minute: Option<i32>, second: Option<i32>, nano: Option<i32>) -> Result<Option<LocalTime>> {
    require!(hour, minute, second, nano);
    time_of(hour, minute, second, nano).map(Some)
}

pub fn parse(text: Option<&str>) -> Result<Option<LocalTime>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn parse_pattern(text: Option<&str>, pattern: Option<&str>) -> Result<Option<LocalTime>> {
    require!(text, pattern);
    parse_with(text, pattern, Parsed::to_time).map(Some)
}

/// Adds a duration, wrapping around midnight.
pub fn plus(time: Option<LocalTime>, duration: Option<Duration>) -> Result<Option<LocalTime>> {
    require!(time, duration);
    Ok(Some(time.plus(duration)))
}

pub fn minus(time: Option<LocalTime>, duration: Option<Duration>) -> Result<Option<LocalTime>> {
    require!(time, duration);
    Ok(Some(time.minus(duration)))
}

/// Adds the hours, minutes, seconds, and nanoseconds, wrapping around
/// midnight.
pub fn plus_components(time: Option<LocalTime>, hours: Option<i32>, minutes: Option<i32>, seconds: Option<i32>, nanos: Option<i32>) -> Result<Option<LocalTime>> {
    require!(time, hours, minutes, seconds, nanos);
    let time = time.plus_hours(hours as i64)
                   .plus_minutes(minutes as i64)
                   .plus_seconds(seconds as i64)
                   .plus_nanos(nanos as i64);
    Ok(Some(time))
}

pub fn minus_components(time: Option<LocalTime>, hours: Option<i32>, minutes: Option<i32>, seconds: Option<i32>, nanos: Option<i32>) -> Result<Option<LocalTime>> {
    require!(time, hours, minutes, seconds, nanos);
    let time = time.plus_hours(-(hours as i64))
                   .plus_minutes(-(minutes as i64))
                   .plus_seconds(-(seconds as i64))
                   .plus_nanos(-(nanos as i64));
    Ok(Some(time))
}

pub fn format(time: Option<LocalTime>) -> Result<Option<String>> {
    require!(time);
    Ok(Some(time.iso().to_string()))
}

pub fn format_pattern(time: Option<LocalTime>, pattern: Option<&str>) -> Result<Option<String>> {
    require!(time, pattern);
    format_with(&time, pattern).map(Some)
}


pub(crate) fn register(registry: &mut Registry) {
    let localtime = DataType::Struct(&LOCALTIME);
    let duration = DataType::Struct(&DURATION);

    registry.add("dt_localtime", &[], localtime,
        "Create a LocalTime from the current time of day",
        |context, _| encoded(now(context).map(Some)));
    registry.add("dt_localtime", &[Integer, Integer, Integer], localtime,
        "Create a LocalTime from an hour, minute, and second",
        |_, args| encoded(of(int(args, 0), int(args, 1), int(args, 2))));
    registry.add("dt_localtime", &[Integer, Integer, Integer, Integer], localtime,
        "Create a LocalTime from an hour, minute, second, and nanosecond",
        |_, args| encoded(of_nano(int(args, 0), int(args, 1), int(args, 2), int(args, 3))));
    registry.add("dt_localtime", &[Varchar], localtime,
        "Create a LocalTime from its ISO-8601 text, such as 10:15:30",
        |_, args| encoded(parse(text(args, 0))));
    registry.add("dt_localtime", &[Varchar, Varchar], localtime,
        "Create a LocalTime from text in the given pattern",
        |_, args| encoded(parse_pattern(text(args, 0), text(args, 1))));

    registry.add("dt_localtime_plus", &[localtime, duration], localtime,
        "Add a Duration to a LocalTime",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_localtime_plus", &[localtime, Integer, Integer, Integer, Integer], localtime,
        "Add hours, minutes, seconds, and nanoseconds to a LocalTime",
        |_, args| encoded(plus_components(record(args, 0)?, int(args, 1), int(args, 2), int(args, 3), int(args, 4))));

    registry.add("dt_localtime_minus", &[localtime, duration], localtime,
        "Subtract a Duration from a LocalTime",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_localtime_minus", &[localtime, Integer, Integer, Integer, Integer], localtime,
        "Subtract hours, minutes, seconds, and nanoseconds from a LocalTime",
        |_, args| encoded(minus_components(record(args, 0)?, int(args, 1), int(args, 2), int(args, 3), int(args, 4))));

    registry.add("dt_localtime_format", &[localtime], Varchar,
        "Render a LocalTime as ISO-8601 text",
        |_, args| scalar(format(record(args, 0)?)));
    registry.add("dt_localtime_format", &[localtime, Varchar], Varchar,
        "Render a LocalTime in the given pattern",
        |_, args| scalar(format_pattern(record(args, 0)?, text(args, 1))));

    registry.add("dt_localtime_chronology", &[localtime, localtime, Varchar], Boolean,
        "Check whether the other LocalTime is before, after, or equal to the base one (IS_BEFORE, IS_AFTER, IS_EQUAL)",
        chronology::invoke::<LocalTime>);
}
