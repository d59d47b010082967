//! Periods: amounts of calendar time in years, months, and days.

use crate::cal::LocalDate;
use crate::cal::fmt::ISO;
use crate::error::Result;
use crate::functions::args::{encoded, int, parse_iso, record, records, scalar, text};
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::period::Period;
use crate::record::DataType::{self, Integer, Varchar};
use crate::record::schema::{LOCALDATE, PERIOD};


pub fn zero() -> Period {
    Period::ZERO
}

pub fn of(years: Option<i32>, months: Option<i32>, days: Option<i32>) -> Result<Option<Period>> {
    require!(years, months, days);
    Ok(Some(Period::of(years, months, days)))
}

pub fn parse(text: Option<&str>) -> Result<Option<Period>> {
    require!(text);
    parse_iso(text).map(Some)
}

pub fn plus(base: Option<Period>, other: Option<Period>) -> Result<Option<Period>> {
    require!(base, other);
    Ok(Some(base.plus(other)?))
}

pub fn minus(base: Option<Period>, other: Option<Period>) -> Result<Option<Period>> {
    require!(base, other);
    Ok(Some(base.minus(other)?))
}

pub fn plus_all(base: Option<Period>, others: Option<Vec<Period>>) -> Result<Option<Period>> {
    require!(base, others);
    Ok(Some(others.into_iter().try_fold(base, Period::plus)?))
}

pub fn minus_all(base: Option<Period>, others: Option<Vec<Period>>) -> Result<Option<Period>> {
    require!(base, others);
    Ok(Some(others.into_iter().try_fold(base, Period::minus)?))
}

pub fn multiply(base: Option<Period>, scalar: Option<i32>) -> Result<Option<Period>> {
    require!(base, scalar);
    Ok(Some(base.multiplied_by(scalar)?))
}

/// Moves whole years out of the months. Days stay as they are.
pub fn normalize(period: Option<Period>) -> Result<Option<Period>> {
    require!(period);
    Ok(Some(period.normalized()?))
}

/// The period between two dates, which is negative when `from` comes
/// after `to`.
pub fn between(from: Option<LocalDate>, to: Option<LocalDate>) -> Result<Option<Period>> {
    require!(from, to);
    Ok(Some(Period::between(from, to)))
}

pub fn between_until_today(context: &Context, from: Option<LocalDate>) -> Result<Option<Period>> {
    require!(from);
    let today = context.clock().today()?;
    Ok(Some(Period::between(from, today)))
}

pub fn stringify(period: Option<Period>) -> Result<Option<String>> {
    require!(period);
    Ok(Some(period.iso().to_string()))
}


pub(crate) fn register(registry: &mut Registry) {
    let period = DataType::Struct(&PERIOD);
    let periods = DataType::Array(&PERIOD);
    let localdate = DataType::Struct(&LOCALDATE);

    registry.add("dt_period", &[], period,
        "Create the zero Period",
        |_, _| encoded(Ok(Some(zero()))));
    registry.add("dt_period", &[Integer, Integer, Integer], period,
        "Create a Period from years, months, and days",
        |_, args| encoded(of(int(args, 0), int(args, 1), int(args, 2))));
    registry.add("dt_period", &[Varchar], period,
        "Create a Period from its ISO-8601 text, such as PnYnMnD or PnW",
        |_, args| encoded(parse(text(args, 0))));

    registry.add("dt_period_plus", &[period, period], period,
        "Add a Period to a Period",
        |_, args| encoded(plus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_period_plus", &[period, periods], period,
        "Add a list of Periods to a Period, in order",
        |_, args| encoded(plus_all(record(args, 0)?, records(args, 1)?)));

    registry.add("dt_period_minus", &[period, period], period,
        "Subtract a Period from a Period",
        |_, args| encoded(minus(record(args, 0)?, record(args, 1)?)));
    registry.add("dt_period_minus", &[period, periods], period,
        "Subtract a list of Periods from a Period, in order",
        |_, args| encoded(minus_all(record(args, 0)?, records(args, 1)?)));

    registry.add("dt_period_multiply", &[period, Integer], period,
        "Multiply each part of a Period by a number",
        |_, args| encoded(multiply(record(args, 0)?, int(args, 1))));

    registry.add("dt_period_normalize", &[period], period,
        "Normalize the years and months of a Period, leaving the days",
        |_, args| encoded(normalize(record(args, 0)?)));

    registry.add("dt_period_between", &[localdate], period,
        "The Period from a LocalDate until today",
        |context, args| encoded(between_until_today(context, record(args, 0)?)));
    registry.add("dt_period_between", &[localdate, localdate], period,
        "The Period between two LocalDates",
        |_, args| encoded(between(record(args, 0)?, record(args, 1)?)));

    registry.add("dt_period_stringify", &[period], Varchar,
        "Render a Period as ISO-8601 text",
        |_, args| scalar(stringify(record(args, 0)?)));
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::Month;

    #[test]
    fn normalizes() {
        assert_eq!(normalize(Some(Period::of(1, 15, 10))), Ok(Some(Period::of(2, 3, 10))));
    }

    #[test]
    fn between_is_negative_backwards() {
        let march = LocalDate::ymd(2020, Month::March, 1).ok();
        let january = LocalDate::ymd(2020, Month::January, 1).ok();
        assert_eq!(between(march, january), Ok(Some(Period::of(0, -2, 0))));
    }

    #[test]
    fn weeks() {
        assert_eq!(parse(Some("P2W")), Ok(Some(Period::of(0, 0, 14))));
    }

    #[test]
    fn fold() {
        let periods = vec![ Period::of(0, 1, 0), Period::of(1, 0, 1) ];
        assert_eq!(plus_all(Some(Period::ZERO), Some(periods)), Ok(Some(Period::of(1, 1, 1))));
    }
}
