//! Zoned date-times: local date-times in a region, with the offset the
//! region uses at that moment.

use crate::cal::fmt::ISO;
use crate::cal::fmt::custom::Parsed;
use crate::cal::{LocalDateTime, ZoneId, ZoneOffset, ZonedDateTime};
use crate::duration::Duration;
use crate::error::Result;
use crate::functions::args::{encoded, format_with, parse_iso, parse_with, record, scalar, text};
use crate::functions::chronology;
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::period::Period;
use crate::record::DataType::{self, Boolean, Varchar};
use crate::record::schema::{DURATION, LOCALDATETIME, PERIOD, ZONEDDATETIME, ZONEID, ZONEOFFSET};


pub fn now(context: &Context) -> Result<ZonedDateTime> {
    Ok(context.clock().zoned_now()?)
}

pub fn now_in(context: &Context, zone: Option<ZoneId>) -> Result<Option<ZonedDateTime>> {
    require!(zone);
    Ok(Some(ZonedDateTime::of_instant(context.clock().now(), zone)?))
}

/// Places a local date-time in a zone. A time in a gap is moved forward
/// by the length of the gap, and a time in an overlap takes the earlier
/// offset.
pub fn of(local: Option<LocalDateTime>, zone: Option<ZoneId>) -> Result<Option<ZonedDateTime>> {
    require!(local, zone);
    Ok(Some(ZonedDateTime::of_local(local, zone, None)?))
}

/// Like `of`, but a time in an overlap takes the preferred offset when
/// it’s one of the two.
pub fn of_preferred(local: Option<LocalDateTime>, zone: Option<ZoneId>, preferred: Option<ZoneOffset>) -> Result<Option<ZonedDateTime>> {
    require!(local, zone, preferred);
    Ok(Some(ZonedDateTime::of_local(local, zone, Some(preferred))?))
}

/// Reads text such as `2011-12-03T10:15:30+01:00[Europe/Paris]`.
pub fn parse(text: Option<&str>) -> Result<Option<ZonedDateTime>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn parse_pattern(text: Option<&str>, pattern: Option<&str>) -> Result<Option<ZonedDateTime>> {
    require!(text, pattern);
    parse_with(text, pattern, Parsed::to_zoned_date_time).map(Some)
}

/// Adds the period on the local timeline, then the duration on the
/// instant timeline.
pub fn plus(zdt: Option<ZonedDateTime>, period: Option<Period>, duration: Option<Duration>) -> Result<Option<ZonedDateTime>> {
    require!(zdt, period, duration);
    Ok(Some(zdt.plus(period)?.plus_duration(duration)?))
}

pub fn minus(zdt: Option<ZonedDateTime>, period: Option<Period>, duration: Option<Duration>) -> Result<Option<ZonedDateTime>> {
    require!(zdt, period, duration);
    Ok(Some(zdt.minus(period)?.minus_duration(duration)?))
}

pub fn format(zdt: Option<ZonedDateTime>) -> Result<Option<String>> {
    require!(zdt);
    Ok(Some(zdt.iso().to_string()))
}

pub fn format_pattern(zdt: Option<ZonedDateTime>, pattern: Option<&str>) -> Result<Option<String>> {
    require!(zdt, pattern);
    format_with(&zdt, pattern).map(Some)
}


pub(crate) fn register(registry: &mut Registry) {
    let zoneddatetime = DataType::Struct(&ZONEDDATETIME);
    let localdatetime = DataType::Struct(&LOCALDATETIME);
    let zoneoffset = DataType::Struct(&ZONEOFFSET);
    let zoneid = DataType::Struct(&ZONEID);
    let period = DataType::Struct(&PERIOD);
    let duration = DataType::Struct(&DURATION);

    registry.add("dt_zoneddatetime", &[], zoneddatetime,
        "Create a ZonedDateTime from the current date and time in the system’s zone",
        |context, _| encoded(now(context).map(Some)));
    registry.add("dt_zoneddatetime", &[zoneid], zoneddatetime,
        "Create a ZonedDateTime from the current date and time in the given zone",
        |context, args| encoded(now_in(context, record(args, 0)?)));
    registry.add("dt_zoneddatetime", &[localdatetime, zoneid], zoneddatetime,
        "Create a ZonedDateTime from a LocalDateTime in the given zone",
        |_, args| encoded(of(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_zoneddatetime", &[localdatetime, zoneid, zoneoffset], zoneddatetime,
        "Create a ZonedDateTime from a LocalDateTime in the given zone, preferring the given offset",
        |_, args| encoded(of_preferred(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_zoneddatetime", &[Varchar], zoneddatetime,
        "Create a ZonedDateTime from its ISO-8601 text, such as 2011-12-03T10:15:30+01:00[Europe/Paris]",
        |_, args| encoded(parse(text(args, 0))));
    registry.add("dt_zoneddatetime", &[Varchar, Varchar], zoneddatetime,
        "Create a ZonedDateTime from text in the given pattern",
        |_, args| encoded(parse_pattern(text(args, 0), text(args, 1))));

    registry.add("dt_zoneddatetime_plus", &[zoneddatetime, period, duration], zoneddatetime,
        "Add a Period and then a Duration to a ZonedDateTime",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_zoneddatetime_minus", &[zoneddatetime, period, duration], zoneddatetime,
        "Subtract a Period and then a Duration from a ZonedDateTime",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?, record(args, 2)?)));

    registry.add("dt_zoneddatetime_format", &[zoneddatetime], Varchar,
        "Render a ZonedDateTime as ISO-8601 text, with the zone in brackets",
        |_, args| scalar(format(record(args, 0)?)));
    registry.add("dt_zoneddatetime_format", &[zoneddatetime, Varchar], Varchar,
        "Render a ZonedDateTime in the given pattern",
        |_, args| scalar(format_pattern(record(args, 0)?, text(args, 1))));

    registry.add("dt_zoneddatetime_chronology", &[zoneddatetime, zoneddatetime, Varchar], Boolean,
        "Check whether the other ZonedDateTime is before, after, or equal to the base one, by instant (IS_BEFORE, IS_AFTER, IS_EQUAL)",
        chronology::invoke::<ZonedDateTime>);
}
