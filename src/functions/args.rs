//! Reading positional arguments, and writing results, for registry entries.
//!
//! By the time an entry gets called, the registry has already checked the
//! argument types, and returned early if any argument was null, so a
//! reader that finds nothing usable just reports it as missing.

use std::fmt;
use std::str::FromStr;

use crate::cal::fmt::custom::{DateFormat, Fields, Parsed, TextError};
use crate::error::{Error, Result};
use crate::record::{FromRecord, ToRecord, Value};


pub(crate) fn record<T: FromRecord>(args: &[Value], index: usize) -> Result<Option<T>> {
    match args.get(index).and_then(Value::as_record) {
        Some(record) => T::from_record(record).map(Some),
        None         => Ok(None),
    }
}

/// Decodes every record in an array argument, in order.
pub(crate) fn records<T: FromRecord>(args: &[Value], index: usize) -> Result<Option<Vec<T>>> {
    match args.get(index).and_then(Value::as_records) {
        Some(records) => records.into_iter().map(T::from_record).collect::<Result<Vec<_>>>().map(Some),
        None          => Ok(None),
    }
}

pub(crate) fn int(args: &[Value], index: usize) -> Option<i32> {
    args.get(index).and_then(Value::as_int)
}

pub(crate) fn long(args: &[Value], index: usize) -> Option<i64> {
    args.get(index).and_then(Value::as_long)
}

pub(crate) fn text(args: &[Value], index: usize) -> Option<&str> {
    args.get(index).and_then(Value::as_str)
}

/// Encodes a result as a record, or null when there isn’t one.
pub(crate) fn encoded<T: ToRecord>(result: Result<Option<T>>) -> Result<Value> {
    Ok(match result? {
        Some(value) => Value::Struct(value.to_record()),
        None        => Value::Null,
    })
}

pub(crate) fn scalar<T: Into<Value>>(result: Result<Option<T>>) -> Result<Value> {
    Ok(Value::from(result?))
}


/// Parses text in a type’s canonical ISO form.
pub(crate) fn parse_iso<T>(input: &str) -> Result<T>
where T: FromStr,
      T::Err: fmt::Display,
{
    input.parse().map_err(|e: T::Err| Error::parse(input, e.to_string()))
}

fn compile(pattern: &str) -> Result<DateFormat<'_>> {
    DateFormat::parse(pattern).map_err(|e| Error::pattern(pattern, e.to_string()))
}

/// Formats a value with a pattern, in the English locale.
pub(crate) fn format_with<T: Fields>(value: &T, pattern: &str) -> Result<String> {
    compile(pattern)?
        .format(value, &locale::Time::english())
        .map_err(|e| Error::pattern(pattern, e.to_string()))
}

/// Reads text with a pattern, in the English locale, then builds a value
/// out of the fields that were read.
pub(crate) fn parse_with<T, F>(input: &str, pattern: &str, build: F) -> Result<T>
where F: FnOnce(&Parsed) -> Result<T, TextError>
{
    let parsed = compile(pattern)?
        .parse_text(input, &locale::Time::english())
        .map_err(|e| Error::parse(input, e.to_string()))?;

    build(&parsed).map_err(|e| Error::parse(input, e.to_string()))
}

/// Narrows an explicit component argument, naming it if it doesn’t fit.
pub(crate) fn component<T: TryFrom<i32>>(name: &'static str, value: i32) -> Result<T> {
    T::try_from(value).map_err(|_| Error::invalid_field(name, format!("{} is out of range", value)))
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::{LocalDate, Month};

    #[test]
    fn bad_pattern() {
        let date = LocalDate::ymd(2020, Month::January, 1).unwrap();
        assert!(matches!(format_with(&date, "{:Y"), Err(Error::Pattern { .. })));
    }

    #[test]
    fn pattern_asks_for_too_much() {
        let date = LocalDate::ymd(2020, Month::January, 1).unwrap();
        assert!(matches!(format_with(&date, "{:h}"), Err(Error::Pattern { .. })));
    }

    #[test]
    fn text_mismatch() {
        let result = parse_with("2020/01/01", "{:Y}-{:n}-{:D}", Parsed::to_date);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn narrowing() {
        assert_eq!(component::<i8>("hours", 23), Ok(23_i8));
        assert!(matches!(component::<i8>("hours", 300), Err(Error::InvalidField { field: "hours", .. })));
    }
}
