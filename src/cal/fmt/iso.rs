use std::fmt;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime, ZoneId, ZoneOffset, ZonedDateTime};
use crate::duration::Duration;
use crate::instant::Instant;
use crate::period::Period;
use crate::util::split_cycles;


const SECONDS_IN_400Y: i64 = 146_097 * 86_400;


/// Values with a canonical ISO-8601 text form.
pub trait ISO: Sized {

    /// Returns something that displays this value in its ISO form.
    fn iso(&self) -> ISOString<'_, Self> {
        ISOString(self)
    }

    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result;
}

/// A value being displayed in its ISO form.
#[derive(Debug)]
pub struct ISOString<'a, T: 'a>(&'a T);

impl<'a, T> fmt::Display for ISOString<'a, T>
where T: ISO
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.iso_fmt(f)
    }
}


/// Writes the digits of a nanosecond fraction, after the point, dropping
/// trailing zeros. With `groups`, whole groups of three are kept instead.
fn write_fraction(f: &mut fmt::Formatter, nanos: i32, groups: bool) -> fmt::Result {
    if nanos == 0 {
        return Ok(());
    }

    let digits = format!("{:09}", nanos);
    let mut len = digits.trim_end_matches('0').len();
    if groups {
        len = (len + 2) / 3 * 3;
    }

    write!(f, ".{}", &digits[..len])
}

fn write_year(f: &mut fmt::Formatter, year: i64) -> fmt::Result {
    if year > 9999 {
        write!(f, "+{}", year)
    }
    else if year < 0 {
        write!(f, "-{:04}", -year)
    }
    else {
        write!(f, "{:04}", year)
    }
}


impl ISO for LocalDate {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_year(f, self.year())?;
        write!(f, "-{:02}-{:02}", self.month() as usize, self.day())
    }
}

impl ISO for LocalTime {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())?;
        write_fraction(f, self.nanosecond(), false)
    }
}

impl ISO for LocalDateTime {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}T{}", self.date().iso(), self.time().iso())
    }
}

impl ISO for ZoneOffset {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_utc() {
            return write!(f, "Z");
        }

        let sign = if self.is_negative() { '-' } else { '+' };
        write!(f, "{}{:02}:{:02}", sign, self.hours().abs(), self.minutes().abs())?;

        if self.seconds() != 0 {
            write!(f, ":{:02}", self.seconds().abs())?;
        }

        Ok(())
    }
}

impl ISO for ZoneId {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl ISO for OffsetDateTime {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.local.iso(), self.offset.iso())
    }
}

impl ISO for ZonedDateTime {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}[{}]", self.local().iso(), self.offset().iso(), self.zone().iso())
    }
}

impl ISO for Instant {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        // Instants reach slightly further than dates do, so the seconds are
        // brought into the first 400-year cycle after the epoch, and the
        // cycles added back onto the year afterwards.
        let (cycles, seconds) = split_cycles(self.seconds(), SECONDS_IN_400Y);
        let local = match LocalDateTime::at_epoch_second(seconds, 0, ZoneOffset::UTC) {
            Ok(local) => local,
            Err(_)    => return Err(fmt::Error),
        };

        write_year(f, local.year() + cycles * 400)?;
        write!(f, "-{:02}-{:02}T{:02}:{:02}:{:02}", local.month() as usize, local.day(), local.hour(), local.minute(), local.second())?;
        write_fraction(f, self.nanos(), true)?;
        write!(f, "Z")
    }
}

impl ISO for Duration {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "PT0S");
        }

        // With a negative duration, the nanoseconds count back up towards
        // zero, so the whole seconds are one fewer in magnitude.
        let borrowed = self.seconds() < 0 && self.nanos() > 0;
        let whole = if borrowed { self.seconds() + 1 } else { self.seconds() };

        let hours   = whole / 3600;
        let minutes = whole % 3600 / 60;
        let seconds = whole % 60;

        write!(f, "PT")?;
        if hours != 0 {
            write!(f, "{}H", hours)?;
        }
        if minutes != 0 {
            write!(f, "{}M", minutes)?;
        }
        if seconds == 0 && self.nanos() == 0 && (hours != 0 || minutes != 0) {
            return Ok(());
        }

        if borrowed && seconds == 0 {
            write!(f, "-0")?;
        }
        else {
            write!(f, "{}", seconds)?;
        }

        let fraction = if borrowed { 1_000_000_000 - self.nanos() } else { self.nanos() };
        write_fraction(f, fraction, false)?;
        write!(f, "S")
    }
}

impl ISO for Period {
    fn iso_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "P0D");
        }

        write!(f, "P")?;
        if self.years() != 0 {
            write!(f, "{}Y", self.years())?;
        }
        if self.months() != 0 {
            write!(f, "{}M", self.months())?;
        }
        if self.days() != 0 {
            write!(f, "{}D", self.days())?;
        }

        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::ISO;
    use crate::cal::{LocalDate, LocalDateTime, LocalTime, Month, OffsetDateTime, ZoneOffset, ZonedDateTime};
    use crate::duration::Duration;
    use crate::instant::Instant;
    use crate::period::Period;

    #[test]
    fn recently() {
        let date = LocalDate::ymd(1600, Month::February, 28).unwrap();
        assert_eq!(date.iso().to_string(), "1600-02-28");
    }

    #[test]
    fn just_then() {
        let date = LocalDate::ymd(-753, Month::December, 1).unwrap();
        assert_eq!(date.iso().to_string(), "-0753-12-01");
    }

    #[test]
    fn far_far_future() {
        let date = LocalDate::ymd(10601, Month::January, 31).unwrap();
        assert_eq!(date.iso().to_string(), "+10601-01-31");
    }

    #[test]
    fn midday() {
        let time = LocalTime::hms(12, 0, 0).unwrap();
        assert_eq!(time.iso().to_string(), "12:00:00");
    }

    #[test]
    fn fraction_is_minimal() {
        let time = LocalTime::hms_ns(1, 2, 3, 450_000_000).unwrap();
        assert_eq!(time.iso().to_string(), "01:02:03.45");
    }

    #[test]
    fn ascending() {
        let then = LocalDateTime::new(
                    LocalDate::ymd(2009, Month::February, 13).unwrap(),
                    LocalTime::hms(23, 31, 30).unwrap());

        assert_eq!(then.iso().to_string(), "2009-02-13T23:31:30");
    }

    #[test]
    fn offsets() {
        assert_eq!(ZoneOffset::UTC.iso().to_string(), "Z");
        assert_eq!(ZoneOffset::of_total_seconds(3600).unwrap().iso().to_string(), "+01:00");
        assert_eq!(ZoneOffset::of_total_seconds(-(5 * 3600 + 30 * 60)).unwrap().iso().to_string(), "-05:30");
        assert_eq!(ZoneOffset::of_total_seconds(3661).unwrap().iso().to_string(), "+01:01:01");
    }

    #[test]
    fn offset_and_zone() {
        let local = LocalDateTime::new(
                    LocalDate::ymd(2007, Month::December, 3).unwrap(),
                    LocalTime::hms(10, 15, 30).unwrap());
        let offset = ZoneOffset::of_total_seconds(3600).unwrap();

        assert_eq!(OffsetDateTime::new(local, offset).iso().to_string(), "2007-12-03T10:15:30+01:00");

        let zoned = ZonedDateTime::of_local(local, "Europe/Paris".parse().unwrap(), None).unwrap();
        assert_eq!(zoned.iso().to_string(), "2007-12-03T10:15:30+01:00[Europe/Paris]");
    }

    #[test]
    fn instants() {
        assert_eq!(Instant::EPOCH.iso().to_string(), "1970-01-01T00:00:00Z");
        assert_eq!(Instant::of_epoch_milli(1_500).iso().to_string(), "1970-01-01T00:00:01.500Z");
        assert_eq!(Instant::of_epoch_second(0, 1_000).unwrap().iso().to_string(), "1970-01-01T00:00:00.000001Z");
        assert_eq!(Instant::of_epoch_milli(-1).iso().to_string(), "1969-12-31T23:59:59.999Z");
    }

    #[test]
    fn instant_past_the_last_date() {
        let last = Instant::of_epoch_second(31_556_889_864_403_199, 0).unwrap();
        assert_eq!(last.iso().to_string(), "+1000000000-12-31T23:59:59Z");
    }

    #[test]
    fn durations() {
        assert_eq!(Duration::ZERO.iso().to_string(), "PT0S");
        assert_eq!(Duration::of_seconds(90_061).iso().to_string(), "PT25H1M1S");
        assert_eq!(Duration::of_seconds(3600).iso().to_string(), "PT1H");
        assert_eq!(Duration::of_seconds_adjusted(1, 500_000_000).unwrap().iso().to_string(), "PT1.5S");
        assert_eq!(Duration::of_nanos(-500_000_000).iso().to_string(), "PT-0.5S");
        assert_eq!(Duration::of_seconds_adjusted(-2, 250_000_000).unwrap().iso().to_string(), "PT-1.75S");
        assert_eq!(Duration::of_seconds(-3661).iso().to_string(), "PT-1H-1M-1S");
    }

    #[test]
    fn periods() {
        assert_eq!(Period::ZERO.iso().to_string(), "P0D");
        assert_eq!(Period::of(1, 2, 3).iso().to_string(), "P1Y2M3D");
        assert_eq!(Period::of(0, -4, 0).iso().to_string(), "P-4M");
    }
}
