//! Offset date-times: local date-times at a fixed offset from UTC.

use crate::cal::fmt::ISO;
use crate::cal::fmt::custom::Parsed;
use crate::cal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZoneId, ZoneOffset, ZonedDateTime};
use crate::duration::Duration;
use crate::error::Result;
use crate::functions::args::{encoded, format_with, parse_iso, parse_with, record, scalar, text};
use crate::functions::chronology;
use crate::functions::context::Context;
use crate::functions::localdatetime::Components;
use crate::functions::registry::Registry;
use crate::period::Period;
use crate::record::DataType::{self, Boolean, Integer, Varchar};
use crate::record::schema::{DURATION, LOCALDATE, LOCALDATETIME, LOCALTIME, OFFSETDATETIME, PERIOD, ZONEID, ZONEOFFSET};


/// The current date-time, at the offset the clock’s zone has right now.
pub fn now(context: &Context) -> Result<OffsetDateTime> {
    Ok(context.clock().zoned_now()?.to_offset_date_time())
}

/// The current date-time, at the offset the given zone has right now.
pub fn now_in(context: &Context, zone: Option<ZoneId>) -> Result<Option<OffsetDateTime>> {
    require!(zone);
    let zoned = ZonedDateTime::of_instant(context.clock().now(), zone)?;
    Ok(Some(zoned.to_offset_date_time()))
}

pub fn of(local: Option<LocalDateTime>, offset: Option<ZoneOffset>) -> Result<Option<OffsetDateTime>> {
    require!(local, offset);
    Ok(Some(OffsetDateTime::new(local, offset)))
}

pub fn of_parts(date: Option<LocalDate>, time: Option<LocalTime>, offset: Option<ZoneOffset>) -> Result<Option<OffsetDateTime>> {
    require!(date, time, offset);
    Ok(Some(OffsetDateTime::of(date, time, offset)))
}

pub fn parse(text: Option<&str>) -> Result<Option<OffsetDateTime>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn parse_pattern(text: Option<&str>, pattern: Option<&str>) -> Result<Option<OffsetDateTime>> {
    require!(text, pattern);
    parse_with(text, pattern, Parsed::to_offset_date_time).map(Some)
}

/// Adds the period, then the duration, keeping the offset.
pub fn plus(odt: Option<OffsetDateTime>, period: Option<Period>, duration: Option<Duration>) -> Result<Option<OffsetDateTime>> {
    require!(odt, period, duration);
    Ok(Some(odt.plus(period)?.plus_duration(duration)?))
}

pub fn minus(odt: Option<OffsetDateTime>, period: Option<Period>, duration: Option<Duration>) -> Result<Option<OffsetDateTime>> {
    require!(odt, period, duration);
    Ok(Some(odt.minus(period)?.minus_duration(duration)?))
}

pub fn plus_components(odt: Option<OffsetDateTime>, components: Option<Components>) -> Result<Option<OffsetDateTime>> {
    require!(odt, components);
    Ok(Some(OffsetDateTime::new(components.apply(odt.local, 1)?, odt.offset)))
}

pub fn minus_components(odt: Option<OffsetDateTime>, components: Option<Components>) -> Result<Option<OffsetDateTime>> {
    require!(odt, components);
    Ok(Some(OffsetDateTime::new(components.apply(odt.local, -1)?, odt.offset)))
}

pub fn format(odt: Option<OffsetDateTime>) -> Result<Option<String>> {
    require!(odt);
    Ok(Some(odt.iso().to_string()))
}

pub fn format_pattern(odt: Option<OffsetDateTime>, pattern: Option<&str>) -> Result<Option<String>> {
    require!(odt, pattern);
    format_with(&odt, pattern).map(Some)
}


pub(crate) fn register(registry: &mut Registry) {
    let offsetdatetime = DataType::Struct(&OFFSETDATETIME);
    let localdatetime = DataType::Struct(&LOCALDATETIME);
    let localdate = DataType::Struct(&LOCALDATE);
    let localtime = DataType::Struct(&LOCALTIME);
    let zoneoffset = DataType::Struct(&ZONEOFFSET);
    let zoneid = DataType::Struct(&ZONEID);
    let period = DataType::Struct(&PERIOD);
    let duration = DataType::Struct(&DURATION);

    registry.add("dt_offsetdatetime", &[], offsetdatetime,
        "Create an OffsetDateTime from the current date and time in the system’s zone",
        |context, _| encoded(now(context).map(Some)));
    registry.add("dt_offsetdatetime", &[zoneid], offsetdatetime,
        "Create an OffsetDateTime from the current date and time in the given zone",
        |context, args| encoded(now_in(context, record(args, 0)?)));
    registry.add("dt_offsetdatetime", &[localdatetime, zoneoffset], offsetdatetime,
        "Create an OffsetDateTime from a LocalDateTime and a ZoneOffset",
        |_, args| encoded(of(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_offsetdatetime", &[localdate, localtime, zoneoffset], offsetdatetime,
        "Create an OffsetDateTime from a LocalDate, a LocalTime, and a ZoneOffset",
        |_, args| encoded(of_parts(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_offsetdatetime", &[Varchar], offsetdatetime,
        "Create an OffsetDateTime from its ISO-8601 text, such as 2011-12-03T10:15:30+01:00",
        |_, args| encoded(parse(text(args, 0))));
    registry.add("dt_offsetdatetime", &[Varchar, Varchar], offsetdatetime,
        "Create an OffsetDateTime from text in the given pattern",
        |_, args| encoded(parse_pattern(text(args, 0), text(args, 1))));

    let with_components: Vec<DataType> = Some(offsetdatetime).into_iter().chain([Integer; 7]).collect();

    registry.add("dt_offsetdatetime_plus", &[offsetdatetime, period, duration], offsetdatetime,
        "Add a Period and then a Duration to an OffsetDateTime",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_offsetdatetime_plus", &with_components, offsetdatetime,
        "Add years, months, days, hours, minutes, seconds, and nanoseconds to an OffsetDateTime",
        |_, args| encoded(plus_components(record(args, 0)?, Components::from_args(args, 1))));

    registry.add("dt_offsetdatetime_minus", &[offsetdatetime, period, duration], offsetdatetime,
        "Subtract a Period and then a Duration from an OffsetDateTime",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?, record(args, 2)?)));
    registry.add("dt_offsetdatetime_minus", &with_components, offsetdatetime,
        "Subtract years, months, days, hours, minutes, seconds, and nanoseconds from an OffsetDateTime",
        |_, args| encoded(minus_components(record(args, 0)?, Components::from_args(args, 1))));

    registry.add("dt_offsetdatetime_format", &[offsetdatetime], Varchar,
        "Render an OffsetDateTime as ISO-8601 text",
        |_, args| scalar(format(record(args, 0)?)));
    registry.add("dt_offsetdatetime_format", &[offsetdatetime, Varchar], Varchar,
        "Render an OffsetDateTime in the given pattern",
        |_, args| scalar(format_pattern(record(args, 0)?, text(args, 1))));

    registry.add("dt_offsetdatetime_chronology", &[offsetdatetime, offsetdatetime, Varchar], Boolean,
        "Check whether the other OffsetDateTime is before, after, or equal to the base one, by instant (IS_BEFORE, IS_AFTER, IS_EQUAL)",
        chronology::invoke::<OffsetDateTime>);
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::Month;
    use crate::clock::FixedClock;
    use crate::instant::Instant;

    fn odt(day: i8, hour: i8, offset_hours: i32) -> OffsetDateTime {
        OffsetDateTime::of(LocalDate::ymd(2020, Month::June, day).unwrap(),
                           LocalTime::hms(hour, 0, 0).unwrap(),
                           ZoneOffset::of_total_seconds(offset_hours * 3600).unwrap())
    }

    #[test]
    fn now_in_a_zone() {
        let context = Context::default().with_clock(FixedClock::new(Instant::of_epoch_second(1_591_012_800, 0).unwrap(), ZoneId::utc()));
        let new_york: ZoneId = "America/New_York".parse().unwrap();

        assert_eq!(now_in(&context, Some(new_york)), Ok(Some(odt(1, 8, -4))));
        assert_eq!(now(&context), Ok(odt(1, 12, 0)));
    }

    #[test]
    fn keeps_offset() {
        let result = plus_components(Some(odt(1, 23, 2)), Some(Components { years: 0, months: 0, days: 0, hours: 2, minutes: 0, seconds: 0, nanos: 0 }));
        assert_eq!(result, Ok(Some(odt(2, 1, 2))));
    }

    #[test]
    fn iso_text() {
        assert_eq!(format(Some(odt(1, 10, 1))), Ok(Some("2020-06-01T10:00:00+01:00".to_owned())));
        assert_eq!(parse(Some("2020-06-01T10:00:00+01:00")), Ok(Some(odt(1, 10, 1))));
    }

    #[test]
    fn pattern() {
        assert_eq!(format_pattern(Some(odt(1, 10, -3)), Some("{02:h}{:z}")), Ok(Some("10-03:00".to_owned())));
    }
}
