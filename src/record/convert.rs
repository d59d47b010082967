//! Turning native values into records, and back again.

use std::ops::RangeInclusive;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::{LocalDate, LocalDateTime, LocalTime, Month, OffsetDateTime, ZoneId, ZoneOffset, ZonedDateTime};
use crate::cal::{MAX_YEAR, MIN_YEAR};
use crate::cal::fmt::ISO;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::instant::Instant;
use crate::period::Period;
use crate::record::schema::*;
use crate::record::value::{Record, Value};


/// Values that can be written out as a record. This never fails: every
/// native value has a record.
pub trait ToRecord {
    fn to_record(&self) -> Record;
}

/// Values that can be read back from a record.
///
/// Reading fails with `Error::InvalidField` when the record has the wrong
/// shape, or when a field is missing, has the wrong type, or is outside
/// its range. Whole records that are missing never get this far.
pub trait FromRecord: Sized {
    fn schema() -> &'static StructSchema;

    fn from_record(record: &Record) -> Result<Self>;
}


fn expect_schema(record: &Record, expected: &'static StructSchema) -> Result<()> {
    if record.schema() == expected {
        Ok(())
    }
    else {
        Err(Error::invalid_field(expected.name, format!("expected {} but got {}", expected, record.schema())))
    }
}

fn value<'r>(record: &'r Record, field: &'static str) -> Result<&'r Value> {
    match record.get(field) {
        None | Some(Value::Null) => Err(Error::invalid_field(field, "missing")),
        Some(value)              => Ok(value),
    }
}

fn int(record: &Record, field: &'static str) -> Result<i32> {
    value(record, field)?.as_int().ok_or_else(|| Error::invalid_field(field, "expected INTEGER"))
}

fn long(record: &Record, field: &'static str) -> Result<i64> {
    value(record, field)?.as_long().ok_or_else(|| Error::invalid_field(field, "expected BIGINT"))
}

fn string<'r>(record: &'r Record, field: &'static str) -> Result<&'r str> {
    value(record, field)?.as_str().ok_or_else(|| Error::invalid_field(field, "expected VARCHAR"))
}

fn nested<T: FromRecord>(record: &Record, field: &'static str) -> Result<T> {
    let inner = value(record, field)?.as_record().ok_or_else(|| Error::invalid_field(field, "expected STRUCT"))?;
    T::from_record(inner)
}

fn ranged(record: &Record, field: &'static str, range: RangeInclusive<i64>) -> Result<i64> {
    let number = int(record, field)? as i64;
    if range.contains(&number) {
        Ok(number)
    }
    else {
        Err(Error::invalid_field(field, format!("{} is outside {} to {}", number, range.start(), range.end())))
    }
}


impl ToRecord for Instant {
    fn to_record(&self) -> Record {
        Record::from_values(&INSTANT, vec![ Value::Long(self.seconds()), Value::Int(self.nanos()) ])
    }
}

impl FromRecord for Instant {
    fn schema() -> &'static StructSchema { &INSTANT }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &INSTANT)?;
        let seconds = long(record, SECONDS_FIELD)?;
        let nanos = ranged(record, NANOS_FIELD, 0 ..= 999_999_999)?;

        Instant::of_epoch_second(seconds, nanos)
            .map_err(|_| Error::invalid_field(SECONDS_FIELD, format!("{} is outside the supported range", seconds)))
    }
}


impl ToRecord for Duration {
    fn to_record(&self) -> Record {
        Record::from_values(&DURATION, vec![ Value::Long(self.seconds()), Value::Int(self.nanos()) ])
    }
}

impl FromRecord for Duration {
    fn schema() -> &'static StructSchema { &DURATION }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &DURATION)?;
        let seconds = long(record, SECONDS_FIELD)?;
        let nanos = ranged(record, NANOS_FIELD, 0 ..= 999_999_999)?;

        // With the nanoseconds in range this can’t carry, so can’t overflow.
        Ok(Duration::of_seconds_adjusted(seconds, nanos)?)
    }
}


impl ToRecord for Period {
    fn to_record(&self) -> Record {
        Record::from_values(&PERIOD, vec![ Value::Int(self.years()), Value::Int(self.months()), Value::Int(self.days()) ])
    }
}

impl FromRecord for Period {
    fn schema() -> &'static StructSchema { &PERIOD }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &PERIOD)?;
        Ok(Period::of(int(record, YEARS_FIELD)?, int(record, MONTHS_FIELD)?, int(record, DAYS_FIELD)?))
    }
}


impl ToRecord for LocalDate {
    fn to_record(&self) -> Record {
        Record::from_values(&LOCALDATE, vec![
            Value::Int(self.year() as i32),
            Value::Int(self.month() as i32),
            Value::Int(self.day() as i32),
        ])
    }
}

impl FromRecord for LocalDate {
    fn schema() -> &'static StructSchema { &LOCALDATE }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &LOCALDATE)?;
        let year  = ranged(record, YEAR_FIELD, MIN_YEAR ..= MAX_YEAR)?;
        let month = ranged(record, MONTH_FIELD, 1 ..= 12)?;
        let day   = ranged(record, DAY_FIELD, 1 ..= 31)?;

        let month = Month::from_one(month as i8)?;
        LocalDate::ymd(year, month, day as i8)
            .map_err(|_| Error::invalid_field(DAY_FIELD, format!("{:?} {} has no day {}", month, year, day)))
    }
}


impl ToRecord for LocalTime {
    fn to_record(&self) -> Record {
        Record::from_values(&LOCALTIME, vec![
            Value::Int(self.hour() as i32),
            Value::Int(self.minute() as i32),
            Value::Int(self.second() as i32),
            Value::Int(self.nanosecond()),
        ])
    }
}

impl FromRecord for LocalTime {
    fn schema() -> &'static StructSchema { &LOCALTIME }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &LOCALTIME)?;
        let hour   = ranged(record, HOUR_FIELD, 0 ..= 23)?;
        let minute = ranged(record, MINUTE_FIELD, 0 ..= 59)?;
        let second = ranged(record, SECOND_FIELD, 0 ..= 59)?;
        let nano   = ranged(record, NANO_FIELD, 0 ..= 999_999_999)?;

        Ok(LocalTime::hms_ns(hour as i8, minute as i8, second as i8, nano as i32)?)
    }
}


impl ToRecord for LocalDateTime {
    fn to_record(&self) -> Record {
        Record::from_values(&LOCALDATETIME, vec![
            Value::Struct(self.date().to_record()),
            Value::Struct(self.time().to_record()),
        ])
    }
}

impl FromRecord for LocalDateTime {
    fn schema() -> &'static StructSchema { &LOCALDATETIME }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &LOCALDATETIME)?;
        Ok(LocalDateTime::new(nested(record, LOCALDATE_FIELD)?, nested(record, LOCALTIME_FIELD)?))
    }
}


impl ToRecord for ZoneOffset {
    fn to_record(&self) -> Record {
        Record::from_values(&ZONEOFFSET, vec![ Value::Int(self.total_seconds()) ])
    }
}

impl FromRecord for ZoneOffset {
    fn schema() -> &'static StructSchema { &ZONEOFFSET }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &ZONEOFFSET)?;
        let seconds = ranged(record, TOTALSECONDS_FIELD, -64_800 ..= 64_800)?;
        Ok(ZoneOffset::of_total_seconds(seconds as i32)?)
    }
}


impl ToRecord for ZoneId {
    fn to_record(&self) -> Record {
        Record::from_values(&ZONEID, vec![ Value::String(self.id().to_owned()) ])
    }
}

impl FromRecord for ZoneId {
    fn schema() -> &'static StructSchema { &ZONEID }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &ZONEID)?;
        string(record, ID_FIELD)?.parse()
            .map_err(|e| Error::invalid_field(ID_FIELD, format!("{}", e)))
    }
}


impl ToRecord for OffsetDateTime {
    fn to_record(&self) -> Record {
        Record::from_values(&OFFSETDATETIME, vec![
            Value::Struct(self.local.to_record()),
            Value::Struct(self.offset.to_record()),
        ])
    }
}

impl FromRecord for OffsetDateTime {
    fn schema() -> &'static StructSchema { &OFFSETDATETIME }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &OFFSETDATETIME)?;
        Ok(OffsetDateTime::new(nested(record, DATETIME_FIELD)?, nested(record, OFFSET_FIELD)?))
    }
}


impl ToRecord for ZonedDateTime {
    fn to_record(&self) -> Record {
        Record::from_values(&ZONEDDATETIME, vec![
            Value::Struct(self.local().to_record()),
            Value::Struct(self.offset().to_record()),
            Value::Struct(self.zone().to_record()),
        ])
    }
}

/// The offset has to be one the zone actually uses at that local
/// date-time; nothing is adjusted.
impl FromRecord for ZonedDateTime {
    fn schema() -> &'static StructSchema { &ZONEDDATETIME }

    fn from_record(record: &Record) -> Result<Self> {
        expect_schema(record, &ZONEDDATETIME)?;
        let local: LocalDateTime = nested(record, DATETIME_FIELD)?;
        let offset: ZoneOffset = nested(record, OFFSET_FIELD)?;
        let zone: ZoneId = nested(record, ZONE_FIELD)?;

        ZonedDateTime::of_strict(local, offset, zone)
            .map_err(|_| Error::invalid_field(OFFSET_FIELD, format!("{} is not an offset of {} at {}", offset.iso(), zone.id(), local.iso())))
    }
}


#[cfg(test)]
mod test {
    use super::{FromRecord, ToRecord};
    use crate::cal::{LocalDate, LocalDateTime, LocalTime, Month, ZoneId, ZoneOffset, ZonedDateTime};
    use crate::duration::Duration;
    use crate::error::Error;
    use crate::instant::Instant;
    use crate::record::schema::*;
    use crate::record::value::{Record, Value};

    fn date_record(year: i32, month: i32, day: i32) -> Record {
        Record::new(&LOCALDATE).put(YEAR_FIELD, year).unwrap()
                               .put(MONTH_FIELD, month).unwrap()
                               .put(DAY_FIELD, day).unwrap()
    }

    fn time_record(hour: i32, minute: i32, second: i32, nano: i32) -> Record {
        Record::new(&LOCALTIME).put(HOUR_FIELD, hour).unwrap()
                               .put(MINUTE_FIELD, minute).unwrap()
                               .put(SECOND_FIELD, second).unwrap()
                               .put(NANO_FIELD, nano).unwrap()
    }

    fn datetime_record(date: Record, time: Record) -> Record {
        Record::new(&LOCALDATETIME).put(LOCALDATE_FIELD, date).unwrap()
                                   .put(LOCALTIME_FIELD, time).unwrap()
    }

    #[test]
    fn leap_day() {
        let record = datetime_record(date_record(2020, 2, 29), time_record(10, 0, 0, 0));
        let expected = LocalDateTime::new(LocalDate::ymd(2020, Month::February, 29).unwrap(), LocalTime::hms(10, 0, 0).unwrap());

        assert_eq!(LocalDateTime::from_record(&record), Ok(expected));
        assert_eq!(expected.to_record(), record);
    }

    #[test]
    fn no_such_day() {
        let record = datetime_record(date_record(2020, 2, 30), time_record(10, 0, 0, 0));
        assert!(matches!(LocalDateTime::from_record(&record), Err(Error::InvalidField { field: DAY_FIELD, .. })));
    }

    #[test]
    fn month_out_of_range() {
        assert!(matches!(LocalDate::from_record(&date_record(2020, 13, 1)), Err(Error::InvalidField { field: MONTH_FIELD, .. })));
    }

    #[test]
    fn hour_out_of_range() {
        assert!(matches!(LocalTime::from_record(&time_record(24, 0, 0, 0)), Err(Error::InvalidField { field: HOUR_FIELD, .. })));
    }

    #[test]
    fn missing_field() {
        let record = Record::new(&LOCALDATE).put(YEAR_FIELD, 2020).unwrap();
        assert_eq!(LocalDate::from_record(&record), Err(Error::invalid_field(MONTH_FIELD, "missing")));
    }

    #[test]
    fn wrong_schema() {
        let record = date_record(2020, 1, 1);
        assert!(matches!(LocalTime::from_record(&record), Err(Error::InvalidField { field: "LOCALTIME", .. })));
    }

    #[test]
    fn negative_duration_is_canonical() {
        let duration = Duration::of_nanos(-1);
        let record = duration.to_record();

        assert_eq!(record.get(SECONDS_FIELD), Some(&Value::Long(-1)));
        assert_eq!(record.get(NANOS_FIELD), Some(&Value::Int(999_999_999)));
        assert_eq!(Duration::from_record(&record), Ok(duration));
    }

    #[test]
    fn uncanonical_nanos() {
        let record = Record::new(&DURATION).put(SECONDS_FIELD, 1_i64).unwrap()
                                           .put(NANOS_FIELD, -1).unwrap();
        assert!(matches!(Duration::from_record(&record), Err(Error::InvalidField { field: NANOS_FIELD, .. })));
    }

    #[test]
    fn instant_too_far() {
        let record = Record::new(&INSTANT).put(SECONDS_FIELD, i64::MAX).unwrap()
                                          .put(NANOS_FIELD, 0).unwrap();
        assert!(matches!(Instant::from_record(&record), Err(Error::InvalidField { field: SECONDS_FIELD, .. })));
    }

    #[test]
    fn zone_ids() {
        let berlin: ZoneId = "Europe/Berlin".parse().unwrap();
        assert_eq!(ZoneId::from_record(&berlin.to_record()), Ok(berlin));

        let offset = Record::new(&ZONEID).put(ID_FIELD, "+02:00").unwrap();
        assert!(matches!(ZoneId::from_record(&offset), Err(Error::InvalidField { field: ID_FIELD, .. })));
    }

    #[test]
    fn offsets_out_of_range() {
        let record = Record::new(&ZONEOFFSET).put(TOTALSECONDS_FIELD, 64_801).unwrap();
        assert!(matches!(ZoneOffset::from_record(&record), Err(Error::InvalidField { field: TOTALSECONDS_FIELD, .. })));
    }

    #[test]
    fn zoned_offset_must_fit_zone() {
        let berlin: ZoneId = "Europe/Berlin".parse().unwrap();
        let local = LocalDateTime::new(LocalDate::ymd(2020, Month::July, 1).unwrap(), LocalTime::midnight());
        let zoned = ZonedDateTime::of_local(local, berlin, None).unwrap();

        let good = zoned.to_record();
        assert_eq!(ZonedDateTime::from_record(&good), Ok(zoned));

        let wrong = Record::new(&ZONEDDATETIME).put(DATETIME_FIELD, local.to_record()).unwrap()
                                               .put(OFFSET_FIELD, ZoneOffset::UTC.to_record()).unwrap()
                                               .put(ZONE_FIELD, berlin.to_record()).unwrap();
        assert!(matches!(ZonedDateTime::from_record(&wrong), Err(Error::InvalidField { field: OFFSET_FIELD, .. })));
    }
}
