use proptest::prelude::*;

use datetime_functions::record::{FromRecord, ToRecord};
use datetime_functions::record::schema::*;
use datetime_functions::{DatePiece, TimePiece};
use datetime_functions::{Duration, Instant, LocalDate, LocalDateTime, LocalTime, Month, OffsetDateTime, Period};
use datetime_functions::{Error, Record, Value, ZoneId, ZoneOffset, ZonedDateTime};


const ZONES: [&str; 6] = [ "UTC", "Europe/London", "Europe/Paris", "America/New_York", "Asia/Kolkata", "Australia/Lord_Howe" ];

fn local_date() -> impl Strategy<Value = LocalDate> {
    (-9999_i64 ..= 9999, 1_i8 ..= 12, 1_i8 ..= 28)
        .prop_map(|(y, m, d)| LocalDate::ymd(y, Month::from_one(m).unwrap(), d).unwrap())
}

fn local_time() -> impl Strategy<Value = LocalTime> {
    (0_i8 .. 24, 0_i8 .. 60, 0_i8 .. 60, 0_i32 .. 1_000_000_000)
        .prop_map(|(h, m, s, n)| LocalTime::hms_ns(h, m, s, n).unwrap())
}

fn zone() -> impl Strategy<Value = ZoneId> {
    prop::sample::select(ZONES.to_vec()).prop_map(|name| name.parse().unwrap())
}

fn offset() -> impl Strategy<Value = ZoneOffset> {
    (-64_800_i32 ..= 64_800).prop_map(|total| ZoneOffset::of_total_seconds(total).unwrap())
}


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

fn offset_record(total_seconds: i32) -> Record {
    Record::new(&ZONEOFFSET).put(TOTALSECONDS_FIELD, total_seconds).unwrap()
}

fn zone_record(id: &str) -> Record {
    Record::new(&ZONEID).put(ID_FIELD, id).unwrap()
}

/// Writes a local date-time out field by field, the way a host would.
fn record_of(local: LocalDateTime) -> Record {
    datetime_record(date_record(local.year() as i32, local.month() as i32, i32::from(local.day())),
                    time_record(i32::from(local.hour()), i32::from(local.minute()), i32::from(local.second()), local.nanosecond()))
}

/// Reads a record, and checks that writing the value back out gives the
/// same record.
fn rewritten<T: FromRecord + ToRecord>(record: &Record) -> Result<Record, Error> {
    T::from_record(record).map(|value| value.to_record())
}


mod value_first {
    use super::*;

    proptest! {
        #[test]
        fn local_dates(date in local_date()) {
            prop_assert_eq!(LocalDate::from_record(&date.to_record()), Ok(date));
        }

        #[test]
        fn local_times(time in local_time()) {
            prop_assert_eq!(LocalTime::from_record(&time.to_record()), Ok(time));
        }

        #[test]
        fn local_date_times(date in local_date(), time in local_time()) {
            let local = LocalDateTime::new(date, time);
            prop_assert_eq!(LocalDateTime::from_record(&local.to_record()), Ok(local));
        }

        #[test]
        fn durations(seconds in any::<i32>(), nanos in any::<i32>()) {
            let duration = Duration::of_seconds_adjusted(seconds as i64, nanos as i64).unwrap();
            let record = duration.to_record();

            let stored = record.get(NANOS_FIELD).and_then(Value::as_int).unwrap();
            prop_assert!((0 .. 1_000_000_000).contains(&stored));
            prop_assert_eq!(Duration::from_record(&record), Ok(duration));
        }

        #[test]
        fn instants(seconds in -1_000_000_000_000_i64 .. 1_000_000_000_000, nanos in 0_i64 .. 1_000_000_000) {
            let instant = Instant::of_epoch_second(seconds, nanos).unwrap();
            prop_assert_eq!(Instant::from_record(&instant.to_record()), Ok(instant));
        }

        #[test]
        fn periods(years in any::<i32>(), months in any::<i32>(), days in any::<i32>()) {
            let period = Period::of(years, months, days);
            prop_assert_eq!(Period::from_record(&period.to_record()), Ok(period));
        }

        #[test]
        fn offsets(offset in offset()) {
            prop_assert_eq!(ZoneOffset::from_record(&offset.to_record()), Ok(offset));
        }

        #[test]
        fn zone_ids(zone in zone()) {
            prop_assert_eq!(ZoneId::from_record(&zone.to_record()), Ok(zone));
        }

        #[test]
        fn offset_date_times(date in local_date(), time in local_time(), offset in offset()) {
            let odt = OffsetDateTime::of(date, time, offset);
            prop_assert_eq!(OffsetDateTime::from_record(&odt.to_record()), Ok(odt));
        }

        #[test]
        fn zoned_date_times(seconds in -4_000_000_000_i64 .. 4_000_000_000, zone in zone()) {
            let zoned = ZonedDateTime::of_instant(Instant::of_epoch_second(seconds, 0).unwrap(), zone).unwrap();
            prop_assert_eq!(ZonedDateTime::from_record(&zoned.to_record()), Ok(zoned));
        }
    }
}


mod record_first {
    use super::*;

    proptest! {
        #[test]
        fn local_dates(year in -9999_i32 ..= 9999, month in 1_i32 ..= 12, day in 1_i32 ..= 31) {
            let record = date_record(year, month, day);
            match rewritten::<LocalDate>(&record) {
                Ok(again) => prop_assert_eq!(again, record),
                Err(e)    => prop_assert!(matches!(e, Error::InvalidField { field: DAY_FIELD, .. }), "{:?}", e),
            }
        }

        #[test]
        fn local_times(hour in 0_i32 .. 24, minute in 0_i32 .. 60, second in 0_i32 .. 60, nano in 0_i32 .. 1_000_000_000) {
            let record = time_record(hour, minute, second, nano);
            prop_assert_eq!(rewritten::<LocalTime>(&record), Ok(record));
        }

        #[test]
        fn local_date_times(year in -9999_i32 ..= 9999, month in 1_i32 ..= 12, day in 1_i32 ..= 28,
                            hour in 0_i32 .. 24, nano in 0_i32 .. 1_000_000_000) {
            let record = datetime_record(date_record(year, month, day), time_record(hour, 30, 15, nano));
            prop_assert_eq!(rewritten::<LocalDateTime>(&record), Ok(record));
        }

        #[test]
        fn durations(seconds in any::<i32>(), nanos in 0_i32 .. 1_000_000_000) {
            let record = Record::new(&DURATION).put(SECONDS_FIELD, seconds).unwrap()
                                               .put(NANOS_FIELD, nanos).unwrap();
            prop_assert_eq!(rewritten::<Duration>(&record), Ok(record));
        }

        #[test]
        fn instants(seconds in any::<i64>(), nanos in 0_i32 .. 1_000_000_000) {
            let seconds = seconds % 1_000_000_000_000;
            let record = Record::new(&INSTANT).put(SECONDS_FIELD, seconds).unwrap()
                                              .put(NANOS_FIELD, nanos).unwrap();
            prop_assert_eq!(rewritten::<Instant>(&record), Ok(record));
        }

        #[test]
        fn periods(years in any::<i32>(), months in any::<i32>(), days in any::<i32>()) {
            let record = Record::new(&PERIOD).put(YEARS_FIELD, years).unwrap()
                                             .put(MONTHS_FIELD, months).unwrap()
                                             .put(DAYS_FIELD, days).unwrap();
            prop_assert_eq!(rewritten::<Period>(&record), Ok(record));
        }

        #[test]
        fn offsets(total_seconds in -64_800_i32 ..= 64_800) {
            let record = offset_record(total_seconds);
            prop_assert_eq!(rewritten::<ZoneOffset>(&record), Ok(record));
        }

        #[test]
        fn zone_ids(id in prop::sample::select(ZONES.to_vec())) {
            let record = zone_record(id);
            prop_assert_eq!(rewritten::<ZoneId>(&record), Ok(record));
        }

        #[test]
        fn offset_date_times(date in local_date(), time in local_time(), total_seconds in -64_800_i32 ..= 64_800) {
            let record = Record::new(&OFFSETDATETIME).put(DATETIME_FIELD, record_of(LocalDateTime::new(date, time))).unwrap()
                                                     .put(OFFSET_FIELD, offset_record(total_seconds)).unwrap();
            prop_assert_eq!(rewritten::<OffsetDateTime>(&record), Ok(record));
        }

        #[test]
        fn zoned_date_times(seconds in -4_000_000_000_i64 .. 4_000_000_000, zone in zone()) {
            let zoned = ZonedDateTime::of_instant(Instant::of_epoch_second(seconds, 0).unwrap(), zone).unwrap();
            let record = Record::new(&ZONEDDATETIME).put(DATETIME_FIELD, record_of(zoned.local())).unwrap()
                                                    .put(OFFSET_FIELD, offset_record(zoned.offset().total_seconds())).unwrap()
                                                    .put(ZONE_FIELD, zone_record(zone.id())).unwrap();
            prop_assert_eq!(rewritten::<ZonedDateTime>(&record), Ok(record));
        }
    }

    #[test]
    fn small_seconds_come_back_the_same() {
        let record = Record::new(&DURATION).put(SECONDS_FIELD, 5).unwrap()
                                           .put(NANOS_FIELD, 0).unwrap();
        assert_eq!(rewritten::<Duration>(&record), Ok(record));
    }
}


#[test]
fn leap_days_only_in_leap_years() {
    assert!(LocalDate::from_record(&date_record(2024, 2, 29)).is_ok());
    assert!(LocalDate::from_record(&date_record(2000, 2, 29)).is_ok());
    assert!(matches!(LocalDate::from_record(&date_record(1900, 2, 29)), Err(Error::InvalidField { field: DAY_FIELD, .. })));
    assert!(matches!(LocalDate::from_record(&date_record(2023, 2, 29)), Err(Error::InvalidField { field: DAY_FIELD, .. })));
}

#[test]
fn nested_records_are_checked() {
    let time = Record::new(&LOCALTIME).put(HOUR_FIELD, 12).unwrap()
                                      .put(MINUTE_FIELD, 60).unwrap()
                                      .put(SECOND_FIELD, 0).unwrap()
                                      .put(NANO_FIELD, 0).unwrap();
    let record = Record::new(&LOCALDATETIME).put(LOCALDATE_FIELD, date_record(2020, 1, 1)).unwrap()
                                            .put(LOCALTIME_FIELD, time).unwrap();

    assert!(matches!(LocalDateTime::from_record(&record), Err(Error::InvalidField { field: MINUTE_FIELD, .. })));
}

#[test]
fn zone_ids_must_be_regions() {
    for id in [ "Europe/Berlin", "America/Argentina/Buenos_Aires", "UTC" ] {
        let record = Record::new(&ZONEID).put(ID_FIELD, id).unwrap();
        assert_eq!(ZoneId::from_record(&record).map(|zone| zone.id()), Ok(id));
    }

    for id in [ "Europe/Atlantis", "", "+05:00" ] {
        let record = Record::new(&ZONEID).put(ID_FIELD, id).unwrap();
        assert!(matches!(ZoneId::from_record(&record), Err(Error::InvalidField { field: ID_FIELD, .. })));
    }
}

#[test]
fn records_refuse_wrong_types() {
    assert!(matches!(Record::new(&LOCALDATE).put(YEAR_FIELD, 2020_i64), Err(Error::InvalidField { field: YEAR_FIELD, .. })));
    assert!(matches!(Record::new(&LOCALDATE).put(SECONDS_FIELD, 1), Err(Error::InvalidField { field: SECONDS_FIELD, .. })));
}
