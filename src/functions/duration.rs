//! Durations: amounts of time in seconds and nanoseconds.

use crate::cal::fmt::ISO;
use crate::cal::{LocalDateTime, LocalTime};
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::functions::args::{encoded, long, parse_iso, record, records, scalar, text};
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::instant::Instant;
use crate::record::DataType::{self, BigInt, Varchar};
use crate::record::schema::{DURATION, INSTANT, LOCALDATETIME, LOCALTIME};


pub fn zero() -> Duration {
    Duration::ZERO
}

pub fn of_seconds(seconds: Option<i64>) -> Result<Option<Duration>> {
    require!(seconds);
    Ok(Some(Duration::of_seconds(seconds)))
}

pub fn of_seconds_adjusted(seconds: Option<i64>, nano_adjustment: Option<i64>) -> Result<Option<Duration>> {
    require!(seconds, nano_adjustment);
    Duration::of_seconds_adjusted(seconds, nano_adjustment)
        .map(Some)
        .map_err(|_| Error::invalid_field("seconds", format!("{}s {}ns is too long", seconds, nano_adjustment)))
}

pub fn parse(text: Option<&str>) -> Result<Option<Duration>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn plus(base: Option<Duration>, other: Option<Duration>) -> Result<Option<Duration>> {
    require!(base, other);
    Ok(Some(base.plus(other)?))
}

pub fn minus(base: Option<Duration>, other: Option<Duration>) -> Result<Option<Duration>> {
    require!(base, other);
    Ok(Some(base.minus(other)?))
}

/// Adds each duration in turn, from first to last.
pub fn plus_all(base: Option<Duration>, others: Option<Vec<Duration>>) -> Result<Option<Duration>> {
    require!(base, others);
    let sum = others.into_iter().try_fold(base, Duration::plus)?;
    Ok(Some(sum))
}

/// Subtracts each duration in turn, from first to last.
pub fn minus_all(base: Option<Duration>, others: Option<Vec<Duration>>) -> Result<Option<Duration>> {
    require!(base, others);
    let difference = others.into_iter().try_fold(base, Duration::minus)?;
    Ok(Some(difference))
}

pub fn multiply(base: Option<Duration>, scalar: Option<i64>) -> Result<Option<Duration>> {
    require!(base, scalar);
    Ok(Some(base.multiplied_by(scalar)?))
}

/// Divides by a number, truncating towards zero. Dividing by zero is an
/// error, not a missing result.
pub fn divide(base: Option<Duration>, divisor: Option<i64>) -> Result<Option<Duration>> {
    require!(base, divisor);
    Ok(Some(base.divided_by(divisor)?))
}

/// How many whole times the divisor fits into the base. Dividing by a
/// zero-length duration is an error.
pub fn divide_by_duration(base: Option<Duration>, divisor: Option<Duration>) -> Result<Option<i64>> {
    require!(base, divisor);
    Ok(Some(base.divided_by_duration(divisor)?))
}

pub fn between_times(from: Option<LocalTime>, to: Option<LocalTime>) -> Result<Option<Duration>> {
    require!(from, to);
    Ok(Some(Duration::between_times(from, to)))
}

/// The duration from the given time of day to the current one.
pub fn between_times_until_now(context: &Context, from: Option<LocalTime>) -> Result<Option<Duration>> {
    require!(from);
    let now = context.clock().time_now()?;
    Ok(Some(Duration::between_times(from, now)))
}

pub fn between_datetimes(from: Option<LocalDateTime>, to: Option<LocalDateTime>) -> Result<Option<Duration>> {
    require!(from, to);
    Ok(Some(Duration::between_datetimes(from, to)?))
}

pub fn between_instants(from: Option<Instant>, to: Option<Instant>) -> Result<Option<Duration>> {
    require!(from, to);
    Ok(Some(Duration::between_instants(from, to)?))
}

/// The ISO-8601 form, such as `PT8H6M12.345S`.
pub fn stringify(duration: Option<Duration>) -> Result<Option<String>> {
    require!(duration);
    Ok(Some(duration.iso().to_string()))
}


pub(crate) fn register(registry: &mut Registry) {
    let duration = DataType::Struct(&DURATION);
    let durations = DataType::Array(&DURATION);
    let localtime = DataType::Struct(&LOCALTIME);
    let localdatetime = DataType::Struct(&LOCALDATETIME);
    let instant = DataType::Struct(&INSTANT);

    registry.add("dt_duration", &[], duration,
        "Create the zero Duration",
        |_, _| encoded(Ok(Some(zero()))));
    registry.add("dt_duration", &[BigInt], duration,
        "Create a Duration from seconds",
        |_, args| encoded(of_seconds(long(args, 0))));
    registry.add("dt_duration", &[BigInt, BigInt], duration,
        "Create a Duration from seconds, adjusted by nanoseconds",
        |_, args| encoded(of_seconds_adjusted(long(args, 0), long(args, 1))));
    registry.add("dt_duration", &[Varchar], duration,
        "Create a Duration from its ISO-8601 text, such as PnDTnHnMn.nS",
        |_, args| encoded(parse(text(args, 0))));

    registry.add("dt_duration_plus", &[duration, duration], duration,
        "Add a Duration to a Duration",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_duration_plus", &[duration, durations], duration,
        "Add a list of Durations to a Duration, in order",
        |_, args| encoded(plus_all(record(args, 0)?, records(args, 1)?)));

    registry.add("dt_duration_minus", &[duration, duration], duration,
        "Subtract a Duration from a Duration",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_duration_minus", &[duration, durations], duration,
        "Subtract a list of Durations from a Duration, in order",
        |_, args| encoded(minus_all(record(args, 0)?, records(args, 1)?)));

    registry.add("dt_duration_multiply", &[duration, BigInt], duration,
        "Multiply a Duration by a number",
        |_, args| encoded(multiply(record(args, 0)?, long(args, 1))));

    registry.add("dt_duration_divide", &[duration, BigInt], duration,
        "Divide a Duration by a number",
        |_, args| encoded(divide(record(args, 0)?, long(args, 1))));
    registry.add("dt_duration_divide", &[duration, duration], BigInt,
        "Count how many whole times one Duration fits into another",
        |_, args| scalar(divide_by_duration(record(args, 0)?, record(args, 1)?)));

    registry.add("dt_duration_between", &[localtime], duration,
        "The Duration from a LocalTime until the current time",
        |context, args| encoded(between_times_until_now(context, record(args, 0)?)));
    registry.add("dt_duration_between", &[localtime, localtime], duration,
        "The Duration between two LocalTimes",
        |_, args| encoded(between_times(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_duration_between", &[localdatetime, localdatetime], duration,
        "The Duration between two LocalDateTimes",
        |_, args| encoded(between_datetimes(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_duration_between", &[instant, instant], duration,
        "The Duration between two Instants",
        |_, args| encoded(between_instants(record(args, 0)?, record(args, 1)?)));

    registry.add("dt_duration_stringify", &[duration], Varchar,
        "Render a Duration as ISO-8601 text",
        |_, args| scalar(stringify(record(args, 0)?)));
}


#[cfg(test)]
mod test {
    use super::*;

    fn seconds(s: i64) -> Option<Duration> {
        Some(Duration::of_seconds(s))
    }

    #[test]
    fn divide_by_zero() {
        assert_eq!(divide(seconds(10), Some(0)), Err(Error::DivisionByZero));
        assert_eq!(divide_by_duration(seconds(10), seconds(0)), Err(Error::DivisionByZero));
    }

    #[test]
    fn divide_by_duration_counts() {
        assert_eq!(divide_by_duration(seconds(10), seconds(5)), Ok(Some(2)));
    }

    #[test]
    fn divide_by_scalar_truncates() {
        assert_eq!(divide(seconds(10), Some(3)), Ok(Some(Duration::of_seconds_adjusted(3, 333_333_333).unwrap())));
    }

    #[test]
    fn folds_in_order() {
        assert_eq!(minus_all(seconds(10), Some(vec![ Duration::of_seconds(3), Duration::of_seconds(4) ])), Ok(seconds(3)));
        assert_eq!(plus_all(seconds(10), Some(Vec::new())), Ok(seconds(10)));
    }

    #[test]
    fn stringified() {
        assert_eq!(stringify(seconds(90)), Ok(Some("PT1M30S".to_owned())));
    }

    #[test]
    fn missing() {
        assert_eq!(multiply(None, Some(2)), Ok(None));
        assert_eq!(divide(seconds(1), None), Ok(None));
    }
}
