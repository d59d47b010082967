//! Before, after, or at the same time as.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::cal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime, TimePiece, ZonedDateTime};
use crate::error::{Error, Result};
use crate::functions::args::{record, text};
use crate::functions::context::Context;
use crate::instant::Instant;
use crate::record::{FromRecord, Value};


/// Which question a chronology check asks of the *other* value, relative
/// to the base value.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum ChronologyMode {
    IsBefore,
    IsAfter,
    IsEqual,
}

impl ChronologyMode {

    /// Answers the question, given how the other value compares to the
    /// base value.
    pub fn holds_for(self, other_to_base: Ordering) -> bool {
        match self {
            ChronologyMode::IsBefore => other_to_base == Ordering::Less,
            ChronologyMode::IsAfter  => other_to_base == Ordering::Greater,
            ChronologyMode::IsEqual  => other_to_base == Ordering::Equal,
        }
    }
}

impl FromStr for ChronologyMode {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input {
            "IS_BEFORE" => Ok(ChronologyMode::IsBefore),
            "IS_AFTER"  => Ok(ChronologyMode::IsAfter),
            "IS_EQUAL"  => Ok(ChronologyMode::IsEqual),
            other       => Err(Error::InvalidMode(other.to_owned())),
        }
    }
}


/// Values with an order on the timeline.
///
/// Values with an offset or a zone are ordered by the instant they
/// represent, so the same instant seen from two places counts as equal.
pub trait Chronology {
    fn chronology(&self, other: &Self) -> Ordering;
}

impl Chronology for Instant {
    fn chronology(&self, other: &Self) -> Ordering { self.cmp(other) }
}

impl Chronology for LocalDate {
    fn chronology(&self, other: &Self) -> Ordering { self.cmp(other) }
}

impl Chronology for LocalTime {
    fn chronology(&self, other: &Self) -> Ordering { self.cmp(other) }
}

impl Chronology for LocalDateTime {
    fn chronology(&self, other: &Self) -> Ordering { self.cmp(other) }
}

impl Chronology for OffsetDateTime {
    fn chronology(&self, other: &Self) -> Ordering {
        (self.to_epoch_second(), self.nanosecond()).cmp(&(other.to_epoch_second(), other.nanosecond()))
    }
}

impl Chronology for ZonedDateTime {
    fn chronology(&self, other: &Self) -> Ordering {
        (self.to_epoch_second(), self.nanosecond()).cmp(&(other.to_epoch_second(), other.nanosecond()))
    }
}


/// Reads a mode, logging it and returning nothing if it isn’t one.
fn read_mode(context: &Context, mode: &str) -> Option<ChronologyMode> {
    match mode.parse() {
        Ok(mode) => Some(mode),
        Err(e) => {
            context.logger().error(&format!("chronologyMode '{}' is invalid - must be one of: 'IS_BEFORE','IS_AFTER','IS_EQUAL'", mode));
            log::debug!("Rejected chronology mode: {}", e);
            None
        }
    }
}

/// Whether `other` is before, after, or equal to `base`, depending on the
/// mode. An unknown mode isn’t an error: it gets logged, and there’s no
/// answer.
pub fn check<T: Chronology>(context: &Context, base: Option<T>, other: Option<T>, mode: Option<&str>) -> Result<Option<bool>> {
    require!(base, other, mode);
    let Some(mode) = read_mode(context, mode) else { return Ok(None) };

    Ok(Some(mode.holds_for(other.chronology(&base))))
}

/// Reads the mode before decoding anything, so a bad mode never gets as
/// far as the records.
pub(crate) fn invoke<T: Chronology + FromRecord>(context: &Context, args: &[Value]) -> Result<Value> {
    let Some(mode) = text(args, 2) else { return Ok(Value::Null) };
    let Some(mode) = read_mode(context, mode) else { return Ok(Value::Null) };

    let (Some(base), Some(other)) = (record::<T>(args, 0)?, record::<T>(args, 1)?) else { return Ok(Value::Null) };

    Ok(Value::Boolean(mode.holds_for(other.chronology(&base))))
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::{Month, ZoneOffset};

    #[test]
    fn modes() {
        assert_eq!("IS_BEFORE".parse(), Ok(ChronologyMode::IsBefore));
        assert_eq!("IS_AFTER".parse(), Ok(ChronologyMode::IsAfter));
        assert_eq!("IS_EQUAL".parse(), Ok(ChronologyMode::IsEqual));
        assert_eq!("is_equal".parse::<ChronologyMode>(), Err(Error::InvalidMode("is_equal".into())));
    }

    #[test]
    fn other_after_base() {
        let context = Context::default();
        let base = LocalDate::ymd(2020, Month::January, 1).ok();
        let other = LocalDate::ymd(2020, Month::January, 2).ok();

        assert_eq!(check(&context, base, other, Some("IS_AFTER")), Ok(Some(true)));
        assert_eq!(check(&context, base, other, Some("IS_BEFORE")), Ok(Some(false)));
        assert_eq!(check(&context, base, other, Some("IS_EQUAL")), Ok(Some(false)));
    }

    #[test]
    fn bogus() {
        let context = Context::default();
        let base = LocalDate::ymd(2020, Month::January, 1).ok();
        assert_eq!(check(&context, base, base, Some("BOGUS")), Ok(None));
    }

    #[test]
    fn offsets_compare_instants() {
        let local = LocalDateTime::new(LocalDate::ymd(2020, Month::June, 1).unwrap(), LocalTime::hms(12, 0, 0).unwrap());
        let utc = OffsetDateTime::new(local, ZoneOffset::UTC);
        let plus_one = OffsetDateTime::new(local.plus_hours(1).unwrap(), ZoneOffset::of_total_seconds(3600).unwrap());

        assert_eq!(utc.chronology(&plus_one), Ordering::Equal);
    }
}
