//! Local dates: days in the calendar, without a time or a zone.

use crate::cal::fmt::ISO;
use crate::cal::fmt::custom::Parsed;
use crate::cal::{LocalDate, Month, MAX_YEAR, MIN_YEAR};
use crate::error::{Error, Result};
use crate::functions::args::{component, encoded, format_with, int, long, parse_iso, parse_with, record, scalar, text};
use crate::functions::chronology;
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::period::Period;
use crate::record::DataType::{self, BigInt, Boolean, Integer, Varchar};
use crate::record::schema::{LOCALDATE, PERIOD};


/// Builds a date out of explicit arguments, naming whichever one is
/// wrong.
pub(crate) fn date_of(year: i32, month: i32, day: i32) -> Result<LocalDate> {
    let year = year as i64;
    if !(MIN_YEAR ..= MAX_YEAR).contains(&year) {
        return Err(Error::invalid_field("year", format!("{} is out of range", year)));
    }

    let month = Month::from_one(component("month", month)?)
        .map_err(|_| Error::invalid_field("month", format!("{} is not a month", month)))?;

    LocalDate::ymd(year, month, component("day", day)?)
        .map_err(|_| Error::invalid_field("day", format!("{:?} {} has no day {}", month, year, day)))
}


pub fn today(context: &Context) -> Result<LocalDate> {
    Ok(context.clock().today()?)
}

pub fn of(year: Option<i32>, month: Option<i32>, day: Option<i32>) -> Result<Option<LocalDate>> {
    require!(year, month, day);
    date_of(year, month, day).map(Some)
}

pub fn of_epoch_day(epoch_days: Option<i64>) -> Result<Option<LocalDate>> {
    require!(epoch_days);
    LocalDate::from_epoch_day(epoch_days)
        .map(Some)
        .map_err(|_| Error::invalid_field("epochDays", format!("{} is out of range", epoch_days)))
}

pub fn parse(text: Option<&str>) -> Result<Option<LocalDate>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn parse_pattern(text: Option<&str>, pattern: Option<&str>) -> Result<Option<LocalDate>> {
    require!(text, pattern);
    parse_with(text, pattern, Parsed::to_date).map(Some)
}

pub fn plus(date: Option<LocalDate>, period: Option<Period>) -> Result<Option<LocalDate>> {
    require!(date, period);
    Ok(Some(date.plus(period)?))
}

pub fn minus(date: Option<LocalDate>, period: Option<Period>) -> Result<Option<LocalDate>> {
    require!(date, period);
    Ok(Some(date.minus(period)?))
}

/// Adds the years, then the months, then the days. Each step keeps the
/// day within its month.
pub fn plus_components(date: Option<LocalDate>, years: Option<i32>, months: Option<i32>, days: Option<i32>) -> Result<Option<LocalDate>> {
    require!(date, years, months, days);
    let date = date.plus_years(years as i64)?
                   .plus_months(months as i64)?
                   .plus_days(days as i64)?;
    Ok(Some(date))
}

pub fn minus_components(date: Option<LocalDate>, years: Option<i32>, months: Option<i32>, days: Option<i32>) -> Result<Option<LocalDate>> {
    require!(date, years, months, days);
    let date = date.plus_years(-(years as i64))?
                   .plus_months(-(months as i64))?
                   .plus_days(-(days as i64))?;
    Ok(Some(date))
}

pub fn format(date: Option<LocalDate>) -> Result<Option<String>> {
    require!(date);
    Ok(Some(date.iso().to_string()))
}

pub fn format_pattern(date: Option<LocalDate>, pattern: Option<&str>) -> Result<Option<String>> {
    require!(date, pattern);
    format_with(&date, pattern).map(Some)
}


pub(crate) fn register(registry: &mut Registry) {
    let localdate = DataType::Struct(&LOCALDATE);
    let period = DataType::Struct(&PERIOD);

    registry.add("dt_localdate", &[], localdate,
        "Create a LocalDate from today’s date",
        |context, _| encoded(today(context).map(Some)));
    registry.add("dt_localdate", &[Integer, Integer, Integer], localdate,
        "Create a LocalDate from a year, month, and day",
        |_, args| encoded(of(int(args, 0), int(args, 1), int(args, 2))));
    registry.add("dt_localdate", &[BigInt], localdate,
        "Create a LocalDate from days since the epoch",
        |_, args| encoded(of_epoch_day(long(args, 0))));
    registry.add("dt_localdate", &[Varchar], localdate,
        "Create a LocalDate from its ISO-8601 text, such as 2011-12-03",
        |_, args| encoded(parse(text(args, 0))));
    registry.add("dt_localdate", &[Varchar, Varchar], localdate,
        "Create a LocalDate from text in the given pattern",
        |_, args| encoded(parse_pattern(text(args, 0), text(args, 1))));

    registry.add("dt_localdate_plus", &[localdate, period], localdate,
        "Add a Period to a LocalDate",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_localdate_plus", &[localdate, Integer, Integer, Integer], localdate,
        "Add years, months, and days to a LocalDate",
        |_, args| encoded(plus_components(record(args, 0)?, int(args, 1), int(args, 2), int(args, 3))));

    registry.add("dt_localdate_minus", &[localdate, period], localdate,
        "Subtract a Period from a LocalDate",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_localdate_minus", &[localdate, Integer, Integer, Integer], localdate,
        "Subtract years, months, and days from a LocalDate",
        |_, args| encoded(minus_components(record(args, 0)?, int(args, 1), int(args, 2), int(args, 3))));

    registry.add("dt_localdate_format", &[localdate], Varchar,
        "Render a LocalDate as ISO-8601 text",
        |_, args| scalar(format(record(args, 0)?)));
    registry.add("dt_localdate_format", &[localdate, Varchar], Varchar,
        "Render a LocalDate in the given pattern",
        |_, args| scalar(format_pattern(record(args, 0)?, text(args, 1))));

    registry.add("dt_localdate_chronology", &[localdate, localdate, Varchar], Boolean,
        "Check whether the other LocalDate is before, after, or equal to the base one (IS_BEFORE, IS_AFTER, IS_EQUAL)",
        chronology::invoke::<LocalDate>);
}
