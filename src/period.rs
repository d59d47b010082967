//! Calendar-based amounts of time.

use std::fmt;

use crate::cal::{DatePiece, Error, LocalDate};
use crate::cal::fmt::ISO;


/// A **period** is an amount of time in years, months, and days, such as
/// “2 years, 3 months and 4 days”.
///
/// Unlike a `Duration`, a period has no fixed length: adding a month to a
/// date moves it by anything from 28 to 31 days. The three fields are
/// independent and may have different signs, and no field is ever
/// normalised into another unless `normalized` is asked for.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct Period {
    years:  i32,
    months: i32,
    days:   i32,
}

impl Period {

    /// The zero period.
    pub const ZERO: Period = Period { years: 0, months: 0, days: 0 };

    pub fn of(years: i32, months: i32, days: i32) -> Self {
        Self { years, months, days }
    }

    pub fn years(&self) -> i32 {
        self.years
    }

    pub fn months(&self) -> i32 {
        self.months
    }

    pub fn days(&self) -> i32 {
        self.days
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// The number of years and months, as months.
    pub fn to_total_months(&self) -> i64 {
        self.years as i64 * 12 + self.months as i64
    }

    pub fn plus(self, other: Self) -> Result<Self, Error> {
        Ok(Self {
            years:  self.years.checked_add(other.years).ok_or(Error::Overflow)?,
            months: self.months.checked_add(other.months).ok_or(Error::Overflow)?,
            days:   self.days.checked_add(other.days).ok_or(Error::Overflow)?,
        })
    }

    pub fn minus(self, other: Self) -> Result<Self, Error> {
        Ok(Self {
            years:  self.years.checked_sub(other.years).ok_or(Error::Overflow)?,
            months: self.months.checked_sub(other.months).ok_or(Error::Overflow)?,
            days:   self.days.checked_sub(other.days).ok_or(Error::Overflow)?,
        })
    }

    /// Multiplies each of the three fields by the scalar.
    pub fn multiplied_by(self, scalar: i32) -> Result<Self, Error> {
        Ok(Self {
            years:  self.years.checked_mul(scalar).ok_or(Error::Overflow)?,
            months: self.months.checked_mul(scalar).ok_or(Error::Overflow)?,
            days:   self.days.checked_mul(scalar).ok_or(Error::Overflow)?,
        })
    }

    /// Folds every twelve months into a year, leaving the days alone.
    ///
    /// The years and months end up with the same sign, so 1 year and
    /// −13 months becomes −1 month.
    ///
    /// ```rust
    /// use datetime_functions::Period;
    ///
    /// let p = Period::of(1, 15, 40).normalized().unwrap();
    /// assert_eq!((p.years(), p.months(), p.days()), (2, 3, 40));
    /// ```
    pub fn normalized(self) -> Result<Self, Error> {
        let total = self.to_total_months();
        let years = i32::try_from(total / 12).map_err(|_| Error::Overflow)?;

        Ok(Self {
            years,
            months: (total % 12) as i32,
            days: self.days,
        })
    }

    /// The period between two dates, counting whole months first and then
    /// the days left over. The result is negative when the start comes
    /// after the end.
    ///
    /// ```rust
    /// use datetime_functions::{LocalDate, Month, Period};
    ///
    /// let start = LocalDate::ymd(2020, Month::January, 31).unwrap();
    /// let end = LocalDate::ymd(2020, Month::March, 1).unwrap();
    /// assert_eq!(Period::between(start, end), Period::of(0, 1, 1));
    /// ```
    pub fn between(start: LocalDate, end: LocalDate) -> Self {
        let mut total_months = end.proleptic_month() - start.proleptic_month();
        let mut days = end.day() as i64 - start.day() as i64;

        if total_months > 0 && days < 0 {
            total_months -= 1;

            // Counting from the start, the last whole month can only land
            // on a date that exists, so this can’t fail for valid dates.
            days = match start.plus_months(total_months) {
                Ok(date) => end.to_epoch_day() - date.to_epoch_day(),
                Err(_)   => days + end.length_of_month() as i64,
            };
        }
        else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= end.length_of_month() as i64;
        }

        Self {
            years:  (total_months / 12) as i32,
            months: (total_months % 12) as i32,
            days:   days as i32,
        }
    }
}

impl fmt::Debug for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Period({})", self.iso())
    }
}


#[cfg(test)]
mod test {
    use super::Period;
    use crate::cal::{Error, LocalDate, Month};

    fn date(year: i64, month: Month, day: i8) -> LocalDate {
        LocalDate::ymd(year, month, day).unwrap()
    }

    #[test]
    fn normalizes_negative_months() {
        let p = Period::of(1, -13, 5).normalized().unwrap();
        assert_eq!(p, Period::of(0, -1, 5));
    }

    #[test]
    fn normalized_keeps_signs_together() {
        let p = Period::of(-1, 2, 0).normalized().unwrap();
        assert_eq!(p, Period::of(0, -10, 0));
    }

    #[test]
    fn between_forwards() {
        let p = Period::between(date(2019, Month::March, 15), date(2020, Month::May, 10));
        assert_eq!(p, Period::of(1, 1, 25));
    }

    #[test]
    fn between_backwards() {
        let p = Period::between(date(2020, Month::May, 10), date(2019, Month::March, 15));
        assert_eq!(p, Period::of(-1, -1, -26));
    }

    #[test]
    fn between_same_day() {
        let d = date(2020, Month::May, 10);
        assert!(Period::between(d, d).is_zero());
    }

    #[test]
    fn overflowing_multiplication() {
        assert_eq!(Period::of(0, 0, i32::MAX).multiplied_by(2), Err(Error::Overflow));
    }
}
