//! Instants: points on the UTC timeline.

use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::functions::args::{encoded, long, parse_iso, record, text};
use crate::functions::chronology;
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::instant::Instant;
use crate::record::DataType::{self, BigInt, Boolean, Varchar};
use crate::record::schema::{DURATION, INSTANT};


pub fn now(context: &Context) -> Instant {
    context.clock().now()
}

pub fn of_epoch_milli(millis: Option<i64>) -> Result<Option<Instant>> {
    require!(millis);
    Ok(Some(Instant::of_epoch_milli(millis)))
}

pub fn of_epoch_second(seconds: Option<i64>, nano_adjustment: Option<i64>) -> Result<Option<Instant>> {
    require!(seconds, nano_adjustment);
    Instant::of_epoch_second(seconds, nano_adjustment)
        .map(Some)
        .map_err(|_| Error::invalid_field("seconds", format!("{}s {}ns is outside the supported range", seconds, nano_adjustment)))
}

pub fn parse(text: Option<&str>) -> Result<Option<Instant>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn plus(instant: Option<Instant>, duration: Option<Duration>) -> Result<Option<Instant>> {
    require!(instant, duration);
    Ok(Some(instant.plus(duration)?))
}

pub fn minus(instant: Option<Instant>, duration: Option<Duration>) -> Result<Option<Instant>> {
    require!(instant, duration);
    Ok(Some(instant.minus(duration)?))
}

/// Adds the seconds, then the nanoseconds.
pub fn plus_components(instant: Option<Instant>, seconds: Option<i64>, nanos: Option<i64>) -> Result<Option<Instant>> {
    require!(instant, seconds, nanos);
    Ok(Some(instant.plus_seconds(seconds)?.plus_nanos(nanos)?))
}

pub fn minus_components(instant: Option<Instant>, seconds: Option<i64>, nanos: Option<i64>) -> Result<Option<Instant>> {
    require!(instant, seconds, nanos);
    let seconds = seconds.checked_neg().ok_or_else(|| Error::invalid_field("seconds", "cannot be negated"))?;
    let nanos = nanos.checked_neg().ok_or_else(|| Error::invalid_field("nanos", "cannot be negated"))?;

    Ok(Some(instant.plus_seconds(seconds)?.plus_nanos(nanos)?))
}


pub(crate) fn register(registry: &mut Registry) {
    let instant = DataType::Struct(&INSTANT);
    let duration = DataType::Struct(&DURATION);

    registry.add("dt_instant", &[], instant,
        "Create an Instant from the current time",
        |context, _| encoded(Ok(Some(now(context)))));
    registry.add("dt_instant", &[BigInt], instant,
        "Create an Instant from milliseconds since the epoch",
        |_, args| encoded(of_epoch_milli(long(args, 0))));
    registry.add("dt_instant", &[BigInt, BigInt], instant,
        "Create an Instant from seconds since the epoch, adjusted by nanoseconds",
        |_, args| encoded(of_epoch_second(long(args, 0), long(args, 1))));
    registry.add("dt_instant", &[Varchar], instant,
        "Create an Instant from its ISO-8601 text, such as 2007-12-03T10:15:30.00Z",
        |_, args| encoded(parse(text(args, 0))));

    registry.add("dt_instant_plus", &[instant, duration], instant,
        "Add a Duration to an Instant",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_instant_plus", &[instant, BigInt, BigInt], instant,
        "Add seconds, then nanoseconds, to an Instant",
        |_, args| encoded(plus_components(record(args, 0)?, long(args, 1), long(args, 2))));

    registry.add("dt_instant_minus", &[instant, duration], instant,
        "Subtract a Duration from an Instant",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_instant_minus", &[instant, BigInt, BigInt], instant,
        "Subtract seconds, then nanoseconds, from an Instant",
        |_, args| encoded(minus_components(record(args, 0)?, long(args, 1), long(args, 2))));

    registry.add("dt_instant_chronology", &[instant, instant, Varchar], Boolean,
        "Check whether the other Instant is before, after, or equal to the base one (IS_BEFORE, IS_AFTER, IS_EQUAL)",
        chronology::invoke::<Instant>);
}
