//! Reading values back from their ISO-8601 text forms.
//!
//! The parsers are lenient in the same ways the canonical forms are
//! loose: seconds may be omitted from a time, `,` may stand in for the
//! decimal point, and duration and period designators ignore case.

use std::str::FromStr;

use nom::{IResult, Parser};
use nom::branch::alt;
use nom::bytes::complete::{take_while1, take_while_m_n};
use nom::character::complete::{char, digit1, one_of};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, value};
use nom::sequence::{delimited, preceded};
use thiserror::Error;

use crate::cal::datetime::{Error as DateTimeError, LocalDate, LocalDateTime, LocalTime, Month};
use crate::cal::offset::{OffsetDateTime, ZoneOffset};
use crate::cal::zone::{ZoneError, ZoneId, ZonedDateTime};
use crate::cal::TimePiece;
use crate::duration::Duration;
use crate::instant::Instant;
use crate::period::Period;


type NomError<'a> = nom::error::Error<&'a str>;


/// Why a piece of text couldn’t be read as a value.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum Error {

    /// The text isn’t in the expected form.
    #[error("parse error: {0}")]
    Parse(String),

    /// The text is in the right form, but the value it describes doesn’t
    /// exist, such as the 31st of April.
    #[error("parsing resulted in an invalid value: {0}")]
    Date(#[from] DateTimeError),

    /// The zone named in the text isn’t a known region.
    #[error(transparent)]
    Zone(#[from] ZoneError),
}

/// Runs a parser over the whole of the input.
fn parse_all<'a, O, P>(input: &'a str, parser: P) -> Result<O, Error>
where P: Parser<&'a str, Output = O, Error = NomError<'a>>
{
    match all_consuming(parser).parse(input) {
        Ok((_, output)) => Ok(output),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(Error::Parse(format!("unexpected text at {:?}", e.input)))
        }
        Err(nom::Err::Incomplete(_)) => Err(Error::Parse("incomplete input".into())),
    }
}


#[derive(PartialEq, Debug, Copy, Clone)]
struct DateFields {
    year:  i64,
    month: i64,
    day:   i64,
}

#[derive(PartialEq, Debug, Copy, Clone)]
struct TimeFields {
    hour:   i64,
    minute: i64,
    second: i64,
    nano:   i64,
}

#[derive(PartialEq, Debug, Copy, Clone)]
enum OffsetFields {
    Utc,
    Signed { sign: i64, hours: i64, minutes: i64, seconds: i64 },
}

impl DateFields {
    fn to_date(self) -> Result<LocalDate, DateTimeError> {
        if ! (1 ..= 12).contains(&self.month) || ! (1 ..= 31).contains(&self.day) {
            return Err(DateTimeError::OutOfRange);
        }

        LocalDate::ymd(self.year, Month::from_one(self.month as i8)?, self.day as i8)
    }
}

impl TimeFields {
    fn to_time(self) -> Result<LocalTime, DateTimeError> {
        LocalTime::hms_ns(self.hour as i8, self.minute as i8, self.second as i8, self.nano as i32)
    }
}

impl OffsetFields {
    fn to_offset(self) -> Result<ZoneOffset, DateTimeError> {
        match self {
            OffsetFields::Utc => Ok(ZoneOffset::UTC),
            OffsetFields::Signed { sign, hours, minutes, seconds } => {
                ZoneOffset::of_hours_minutes_seconds((sign * hours) as i32, (sign * minutes) as i32, (sign * seconds) as i32)
            }
        }
    }
}


fn number<'a>(min: usize, max: usize) -> impl Parser<&'a str, Output = i64, Error = NomError<'a>> {
    map_res(take_while_m_n(min, max, |c: char| c.is_ascii_digit()), |digits: &str| digits.parse::<i64>())
}

fn sign(input: &str) -> IResult<&str, i64> {
    map(one_of("+-"), |c| if c == '-' { -1 } else { 1 }).parse(input)
}

/// An optionally-signed run of digits, kept as text so that the sign of a
/// zero can still be seen.
fn signed_digits(input: &str) -> IResult<&str, &str> {
    recognize((opt(one_of("+-")), digit1)).parse(input)
}

/// A signed number followed by one of the given designator letters.
fn unit<'a>(designators: &'static str) -> impl Parser<&'a str, Output = &'a str, Error = NomError<'a>> {
    map((signed_digits, one_of(designators)), |(number, _)| number)
}

/// Up to nine digits after a decimal point, as nanoseconds.
fn fraction(input: &str) -> IResult<&str, i64> {
    preceded(one_of(".,"), nanos(1)).parse(input)
}

fn nanos<'a>(min: usize) -> impl Parser<&'a str, Output = i64, Error = NomError<'a>> {
    map_res(take_while_m_n(min, 9, |c: char| c.is_ascii_digit()),
            |digits: &str| if digits.is_empty() { Ok(0) } else { format!("{:0<9}", digits).parse::<i64>() })
}

fn year(input: &str) -> IResult<&str, i64> {
    map((opt(sign), number(4, 10)), |(sign, year)| sign.unwrap_or(1) * year).parse(input)
}

fn date(input: &str) -> IResult<&str, DateFields> {
    map((year, char('-'), number(2, 2), char('-'), number(2, 2)),
        |(year, _, month, _, day)| DateFields { year, month, day }).parse(input)
}

fn time(input: &str) -> IResult<&str, TimeFields> {
    let seconds = (preceded(char(':'), number(2, 2)), opt(fraction));

    map((number(2, 2), char(':'), number(2, 2), opt(seconds)),
        |(hour, _, minute, rest)| {
            let (second, nano) = rest.unwrap_or((0, None));
            TimeFields { hour, minute, second, nano: nano.unwrap_or(0) }
        }).parse(input)
}

fn datetime(input: &str) -> IResult<&str, (DateFields, TimeFields)> {
    map((date, one_of("Tt"), time), |(date, _, time)| (date, time)).parse(input)
}

fn offset(input: &str) -> IResult<&str, OffsetFields> {
    let part = || preceded(opt(char(':')), number(2, 2));

    alt((
        value(OffsetFields::Utc, char('Z')),
        map((sign, number(1, 2), opt(part()), opt(part())),
            |(sign, hours, minutes, seconds)| OffsetFields::Signed {
                sign, hours, minutes: minutes.unwrap_or(0), seconds: seconds.unwrap_or(0),
            }),
    )).parse(input)
}

/// Reads an offset from the start of the input, returning whatever text
/// follows it.
pub(crate) fn leading_offset(input: &str) -> Result<(&str, ZoneOffset), Error> {
    match offset(input) {
        Ok((rest, fields)) => Ok((rest, fields.to_offset()?)),
        Err(_)             => Err(Error::Parse(format!("no offset at {:?}", input))),
    }
}

fn zone_name(input: &str) -> IResult<&str, &str> {
    delimited(char('['), take_while1(|c: char| c != ']'), char(']')).parse(input)
}


impl FromStr for LocalDate {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(parse_all(input, date)?.to_date()?)
    }
}

impl FromStr for LocalTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(parse_all(input, time)?.to_time()?)
    }
}

impl FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (date, time) = parse_all(input, datetime)?;
        Ok(Self::new(date.to_date()?, time.to_time()?))
    }
}


impl FromStr for ZoneOffset {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(parse_all(input, offset)?.to_offset()?)
    }
}

impl FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let ((date, time), offset) = parse_all(input, (datetime, offset))?;
        let local = LocalDateTime::new(date.to_date()?, time.to_time()?);
        Ok(Self::new(local, offset.to_offset()?))
    }
}

/// The offset in the text is only a preference: if the zone disagrees with
/// it, the zone wins.
impl FromStr for ZonedDateTime {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let ((date, time), offset, zone) = parse_all(input, (datetime, offset, zone_name))?;
        let local = LocalDateTime::new(date.to_date()?, time.to_time()?);
        let zone = zone.parse::<ZoneId>()?;
        Ok(Self::of_local(local, zone, Some(offset.to_offset()?))?)
    }
}

impl FromStr for Instant {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let ((date, time), offset) = parse_all(input, (datetime, offset))?;
        let local = LocalDateTime::new(date.to_date()?, time.to_time()?);
        let seconds = local.to_epoch_second(offset.to_offset()?);
        Ok(Self::of_epoch_second(seconds, local.nanosecond() as i64)?)
    }
}


#[derive(Debug)]
struct DurationFields<'a> {
    negative: bool,
    days:     Option<&'a str>,
    time:     Option<(Option<&'a str>, Option<&'a str>, Option<(&'a str, i64)>)>,
}

fn duration(input: &str) -> IResult<&str, DurationFields<'_>> {
    let seconds = map((signed_digits, opt(preceded(one_of(".,"), nanos(0))), one_of("Ss")),
                      |(s, n, _)| (s, n.unwrap_or(0)));

    let time_part = preceded(one_of("Tt"), (opt(unit("Hh")), opt(unit("Mm")), opt(seconds)));

    map((opt(sign), one_of("Pp"), opt(unit("Dd")), opt(time_part)),
        |(sign, _, days, time)| DurationFields { negative: sign == Some(-1), days, time }).parse(input)
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = parse_all(input, duration)?;
        let invalid = || Error::Parse(format!("{:?} is not a duration", input));

        if fields.days.is_none() && fields.time.is_none() {
            return Err(invalid());
        }

        let (hours, minutes, seconds) = fields.time.unwrap_or((None, None, None));
        if fields.time.is_some() && hours.is_none() && minutes.is_none() && seconds.is_none() {
            return Err(invalid());
        }

        let amount = |text: Option<&str>, scale: i128| -> Result<i128, Error> {
            match text {
                None    => Ok(0),
                Some(t) => t.parse::<i64>().map(|n| n as i128 * scale).map_err(|_| invalid()),
            }
        };

        let total_seconds = amount(fields.days, 86_400)?
                          + amount(hours, 3_600)?
                          + amount(minutes, 60)?
                          + amount(seconds.map(|(s, _)| s), 1)?;

        let mut nanos = seconds.map_or(0, |(_, n)| n);
        if seconds.map_or(false, |(s, _)| s.starts_with('-')) {
            nanos = -nanos;
        }

        let total_seconds = i64::try_from(total_seconds).map_err(|_| invalid())?;
        let duration = Duration::of_seconds_adjusted(total_seconds, nanos)?;

        if fields.negative { Ok(duration.negated()?) } else { Ok(duration) }
    }
}

fn period(input: &str) -> IResult<&str, (bool, [Option<&str>; 4])> {
    map((opt(sign), one_of("Pp"), opt(unit("Yy")), opt(unit("Mm")), opt(unit("Ww")), opt(unit("Dd"))),
        |(sign, _, y, m, w, d)| (sign == Some(-1), [y, m, w, d])).parse(input)
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (negative, units) = parse_all(input, period)?;
        let invalid = || Error::Parse(format!("{:?} is not a period", input));

        if units.iter().all(Option::is_none) {
            return Err(invalid());
        }

        let mut numbers = [0_i32; 4];
        for (number, unit) in numbers.iter_mut().zip(units) {
            if let Some(text) = unit {
                *number = text.parse::<i32>().map_err(|_| invalid())?;
            }
        }

        let [years, months, weeks, days] = numbers;
        let days = weeks.checked_mul(7).and_then(|w| w.checked_add(days)).ok_or_else(invalid)?;
        let period = Period::of(years, months, days);

        if negative { period.multiplied_by(-1).map_err(|_| invalid()) } else { Ok(period) }
    }
}


#[cfg(test)]
mod test {
    use super::Error;
    use crate::cal::{Error as DateTimeError, LocalDate, LocalDateTime, LocalTime, Month, OffsetDateTime, ZoneError, ZoneOffset, ZonedDateTime};
    use crate::duration::Duration;
    use crate::instant::Instant;
    use crate::period::Period;

    #[test]
    fn date() {
        let date = LocalDate::ymd(1985, Month::February, 2).unwrap();
        assert_eq!("1985-02-02".parse(), Ok(date));
    }

    #[test]
    fn signed_years() {
        assert_eq!("-0753-12-01".parse(), Ok(LocalDate::ymd(-753, Month::December, 1).unwrap()));
        assert_eq!("+10601-01-31".parse(), Ok(LocalDate::ymd(10601, Month::January, 31).unwrap()));
    }

    #[test]
    fn impossible_date() {
        assert_eq!("2019-02-29".parse::<LocalDate>(), Err(Error::Date(DateTimeError::OutOfRange)));
        assert_eq!("2019-13-01".parse::<LocalDate>(), Err(Error::Date(DateTimeError::OutOfRange)));
    }

    #[test]
    fn trailing_text() {
        assert!(matches!("2019-02-28T".parse::<LocalDate>(), Err(Error::Parse(_))));
    }

    #[test]
    fn times() {
        assert_eq!("10:15".parse(), Ok(LocalTime::hms(10, 15, 0).unwrap()));
        assert_eq!("10:15:30".parse(), Ok(LocalTime::hms(10, 15, 30).unwrap()));
        assert_eq!("10:15:30.5".parse(), Ok(LocalTime::hms_ns(10, 15, 30, 500_000_000).unwrap()));
        assert_eq!("10:15:30,000000007".parse(), Ok(LocalTime::hms_ns(10, 15, 30, 7).unwrap()));
    }

    #[test]
    fn datetime() {
        let then = LocalDateTime::new(
                    LocalDate::ymd(2001, Month::February, 3).unwrap(),
                    LocalTime::hms(4, 5, 6).unwrap());

        assert_eq!("2001-02-03T04:05:06".parse(), Ok(then));
    }

    #[test]
    fn offsets() {
        assert_eq!("Z".parse(), Ok(ZoneOffset::UTC));
        assert_eq!("+1".parse(), Ok(ZoneOffset::of_total_seconds(3600).unwrap()));
        assert_eq!("-0530".parse(), Ok(ZoneOffset::of_total_seconds(-19_800).unwrap()));
        assert_eq!("+01:00:30".parse(), Ok(ZoneOffset::of_total_seconds(3630).unwrap()));
        assert_eq!("+19:00".parse::<ZoneOffset>(), Err(Error::Date(DateTimeError::OutOfRange)));
    }

    #[test]
    fn offset_datetime() {
        let odt: OffsetDateTime = "2001-02-03T04:05:06+07:00".parse().unwrap();
        assert_eq!(odt.offset, ZoneOffset::of_total_seconds(7 * 3600).unwrap());
        assert_eq!(odt.local, "2001-02-03T04:05:06".parse().unwrap());
    }

    #[test]
    fn zoned_datetime() {
        let zdt: ZonedDateTime = "2007-12-03T10:15:30+01:00[Europe/Paris]".parse().unwrap();
        assert_eq!(zdt.zone().id(), "Europe/Paris");
        assert_eq!(zdt.offset(), ZoneOffset::of_total_seconds(3600).unwrap());
    }

    #[test]
    fn zoned_datetime_unknown_zone() {
        let result = "2007-12-03T10:15:30+01:00[Nowhere/Special]".parse::<ZonedDateTime>();
        assert_eq!(result, Err(Error::Zone(ZoneError::UnknownRegion("Nowhere/Special".into()))));
    }

    #[test]
    fn instants() {
        assert_eq!("1970-01-01T00:00:00Z".parse(), Ok(Instant::EPOCH));
        assert_eq!("1970-01-01T01:00:00.250+01:00".parse(), Ok(Instant::of_epoch_milli(250)));
    }

    #[test]
    fn durations() {
        assert_eq!("PT20.345S".parse(), Ok(Duration::of_seconds_adjusted(20, 345_000_000).unwrap()));
        assert_eq!("PT15M".parse(), Ok(Duration::of_seconds(900)));
        assert_eq!("P2D".parse(), Ok(Duration::of_seconds(172_800)));
        assert_eq!("pt1h".parse(), Ok(Duration::of_seconds(3600)));
        assert_eq!("PT-6H3M".parse(), Ok(Duration::of_seconds(-6 * 3600 + 180)));
        assert_eq!("-PT6H3M".parse(), Ok(Duration::of_seconds(-6 * 3600 - 180)));
        assert_eq!("PT-0.5S".parse(), Ok(Duration::of_nanos(-500_000_000)));
    }

    #[test]
    fn bad_durations() {
        for text in ["PT", "P", "P1H", "PT1D", "1S", "PT1.1234567890S"] {
            assert!(text.parse::<Duration>().is_err(), "{} should not parse", text);
        }
    }

    #[test]
    fn periods() {
        assert_eq!("P1Y2M3D".parse(), Ok(Period::of(1, 2, 3)));
        assert_eq!("P2W".parse(), Ok(Period::of(0, 0, 14)));
        assert_eq!("P1W3D".parse(), Ok(Period::of(0, 0, 10)));
        assert_eq!("-P1Y2M".parse(), Ok(Period::of(-1, -2, 0)));
        assert_eq!("p-3m".parse(), Ok(Period::of(0, -3, 0)));
    }

    #[test]
    fn bad_periods() {
        for text in ["P", "P1D1Y", "P9999999999D", "1Y"] {
            assert!(text.parse::<Period>().is_err(), "{} should not parse", text);
        }
    }
}
