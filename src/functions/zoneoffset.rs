//! Zone offsets: fixed differences from UTC.

use crate::cal::ZoneOffset;
use crate::cal::fmt::ISO;
use crate::error::{Error, Result};
use crate::functions::args::{encoded, int, parse_iso, record, scalar, text};
use crate::functions::registry::Registry;
use crate::record::DataType::{self, Integer, Varchar};
use crate::record::schema::ZONEOFFSET;


pub fn of(hours: Option<i32>, minutes: Option<i32>, seconds: Option<i32>) -> Result<Option<ZoneOffset>> {
    require!(hours, minutes, seconds);

    if !(-59 ..= 59).contains(&minutes) {
        return Err(Error::invalid_field("minutes", format!("{} is outside -59 to 59", minutes)));
    }
    if !(-59 ..= 59).contains(&seconds) {
        return Err(Error::invalid_field("seconds", format!("{} is outside -59 to 59", seconds)));
    }

    ZoneOffset::of_hours_minutes_seconds(hours, minutes, seconds)
        .map(Some)
        .map_err(|e| Error::invalid_field("hours", format!("{}h {}m {}s is not an offset ({})", hours, minutes, seconds, e)))
}

pub fn of_total_seconds(total_seconds: Option<i32>) -> Result<Option<ZoneOffset>> {
    require!(total_seconds);
    ZoneOffset::of_total_seconds(total_seconds)
        .map(Some)
        .map_err(|_| Error::invalid_field("totalSeconds", format!("{} is outside -64800 to 64800", total_seconds)))
}

/// Reads `Z`, `+h`, `+hh`, `+hh:mm`, `+hhmm`, `+hh:mm:ss`, or `+hhmmss`.
pub fn parse(text: Option<&str>) -> Result<Option<ZoneOffset>> {
    require!(text);
    parse_iso(text).map(Some)
}

/// `Z` for UTC, otherwise `±hh:mm`, with seconds only when there are any.
pub fn stringify(offset: Option<ZoneOffset>) -> Result<Option<String>> {
    require!(offset);
    Ok(Some(offset.iso().to_string()))
}


pub(crate) fn register(registry: &mut Registry) {
    let zoneoffset = DataType::Struct(&ZONEOFFSET);

    registry.add("dt_zoneoffset", &[Integer, Integer, Integer], zoneoffset,
        "Create a ZoneOffset from hours, minutes, and seconds",
        |_, args| encoded(of(int(args, 0), int(args, 1), int(args, 2))));
    registry.add("dt_zoneoffset", &[Integer], zoneoffset,
        "Create a ZoneOffset from its total seconds",
        |_, args| encoded(of_total_seconds(int(args, 0))));
    registry.add("dt_zoneoffset", &[Varchar], zoneoffset,
        "Create a ZoneOffset from its ID, such as +02:00",
        |_, args| encoded(parse(text(args, 0))));

    registry.add("dt_zoneoffset_stringify", &[zoneoffset], Varchar,
        "Render a ZoneOffset as its ID",
        |_, args| scalar(stringify(record(args, 0)?)));
}
