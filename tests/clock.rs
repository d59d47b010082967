use datetime_functions::record::FromRecord;
use datetime_functions::{Context, Duration, FixedClock, Instant, LocalDate, LocalDateTime, LocalTime, Month, Period};
use datetime_functions::{OffsetDateTime, Registry, Value, ZoneId, ZoneOffset, ZonedDateTime};


fn context() -> Context {
    let berlin: ZoneId = "Europe/Berlin".parse().unwrap();
    let instant = Instant::of_epoch_second(1_234_567_890, 0).unwrap();
    Context::default().with_clock(FixedClock::new(instant, berlin))
}

fn call(name: &str, args: &[Value]) -> Value {
    Registry::standard().invoke(&context(), name, args).unwrap()
}

fn decode<T: FromRecord>(value: Value) -> T {
    T::from_record(value.as_record().unwrap()).unwrap()
}

fn valentines() -> LocalDate {
    LocalDate::ymd(2009, Month::February, 14).unwrap()
}

fn half_past_midnight() -> LocalTime {
    LocalTime::hms(0, 31, 30).unwrap()
}


#[test]
fn instant() {
    assert_eq!(decode::<Instant>(call("dt_instant", &[])), Instant::of_epoch_second(1_234_567_890, 0).unwrap());
}

#[test]
fn today() {
    assert_eq!(decode::<LocalDate>(call("dt_localdate", &[])), valentines());
}

#[test]
fn time_now() {
    assert_eq!(decode::<LocalTime>(call("dt_localtime", &[])), half_past_midnight());
}

#[test]
fn local_now() {
    assert_eq!(decode::<LocalDateTime>(call("dt_localdatetime", &[])), LocalDateTime::new(valentines(), half_past_midnight()));
}

#[test]
fn zone() {
    assert_eq!(decode::<ZoneId>(call("dt_zoneid", &[])).id(), "Europe/Berlin");
}

#[test]
fn offset_now() {
    let odt = decode::<OffsetDateTime>(call("dt_offsetdatetime", &[]));
    assert_eq!(odt, OffsetDateTime::of(valentines(), half_past_midnight(), ZoneOffset::of_total_seconds(3600).unwrap()));
}

#[test]
fn offset_now_elsewhere() {
    let tokyo = call("dt_zoneid", &[ Value::from("Asia/Tokyo") ]);
    let odt = decode::<OffsetDateTime>(call("dt_offsetdatetime", &[ tokyo ]));
    assert_eq!(odt, OffsetDateTime::of(valentines(), LocalTime::hms(8, 31, 30).unwrap(), ZoneOffset::of_total_seconds(9 * 3600).unwrap()));
}

#[test]
fn zoned_now() {
    let zdt = decode::<ZonedDateTime>(call("dt_zoneddatetime", &[]));
    assert_eq!(zdt.local(), LocalDateTime::new(valentines(), half_past_midnight()));
    assert_eq!(zdt.zone().id(), "Europe/Berlin");
}

#[test]
fn period_until_today() {
    let new_year = call("dt_localdate", &[ Value::from("2009-01-01") ]);
    assert_eq!(decode::<Period>(call("dt_period_between", &[ new_year ])), Period::of(0, 1, 13));
}

#[test]
fn duration_until_now() {
    let midnight = call("dt_localtime", &[ Value::from("00:00:00") ]);
    assert_eq!(decode::<Duration>(call("dt_duration_between", &[ midnight ])), Duration::of_seconds(31 * 60 + 30));
}
