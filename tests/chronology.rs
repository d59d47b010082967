use std::sync::{Arc, Mutex};

use datetime_functions::functions::Logger;
use datetime_functions::record::schema::LOCALDATE;
use datetime_functions::{Context, Record, Registry, Value};


#[derive(Debug, Default)]
struct Recorder(Mutex<Vec<String>>);

impl Logger for Recorder {
    fn error(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_owned());
    }
}


fn call(context: &Context, name: &str, args: &[Value]) -> Value {
    Registry::standard().invoke(context, name, args).unwrap()
}

/// Builds a value of the given type from its ISO text, then asks whether
/// `other` relates to `base` in the given way.
fn check(kind: &str, base: &str, other: &str, mode: &str) -> Value {
    let context = Context::default();
    let base = call(&context, &format!("dt_{}", kind), &[ Value::from(base) ]);
    let other = call(&context, &format!("dt_{}", kind), &[ Value::from(other) ]);
    call(&context, &format!("dt_{}_chronology", kind), &[ base, other, Value::from(mode) ])
}


#[test]
fn local_dates() {
    assert_eq!(check("localdate", "2020-01-02", "2020-01-01", "IS_BEFORE"), Value::Boolean(true));
    assert_eq!(check("localdate", "2020-01-02", "2020-01-01", "IS_AFTER"),  Value::Boolean(false));
    assert_eq!(check("localdate", "2020-01-02", "2020-01-02", "IS_EQUAL"),  Value::Boolean(true));
}

#[test]
fn local_times() {
    assert_eq!(check("localtime", "10:00:00", "10:00:01", "IS_AFTER"),  Value::Boolean(true));
    assert_eq!(check("localtime", "10:00:00", "10:00:01", "IS_BEFORE"), Value::Boolean(false));
}

#[test]
fn local_date_times() {
    assert_eq!(check("localdatetime", "2020-01-01T00:00:00", "2019-12-31T23:59:59", "IS_BEFORE"), Value::Boolean(true));
}

#[test]
fn instants() {
    assert_eq!(check("instant", "2020-01-01T00:00:00Z", "2020-01-01T00:00:00Z", "IS_EQUAL"), Value::Boolean(true));
    assert_eq!(check("instant", "2020-01-01T00:00:00Z", "2020-01-01T00:00:01Z", "IS_AFTER"), Value::Boolean(true));
}

#[test]
fn offset_date_times_compare_instants() {
    assert_eq!(check("offsetdatetime", "2020-06-01T10:00:00+02:00", "2020-06-01T09:00:00+01:00", "IS_EQUAL"), Value::Boolean(true));
    assert_eq!(check("offsetdatetime", "2020-06-01T10:00:00+02:00", "2020-06-01T10:00:00+01:00", "IS_AFTER"), Value::Boolean(true));
}

#[test]
fn zoned_date_times_compare_instants() {
    assert_eq!(check("zoneddatetime", "2020-06-01T10:00:00+02:00[Europe/Paris]", "2020-06-01T09:00:00+01:00[Europe/London]", "IS_EQUAL"),
               Value::Boolean(true));
}

#[test]
fn unknown_modes_are_logged() {
    let recorder = Arc::new(Recorder::default());
    let context = Context::default().with_logger(recorder.clone());

    let date = call(&context, "dt_localdate", &[ Value::from("2020-01-01") ]);
    let result = call(&context, "dt_localdate_chronology", &[ date.clone(), date, Value::from("BOGUS") ]);

    assert_eq!(result, Value::Null);
    assert_eq!(*recorder.0.lock().unwrap(),
               vec![ "chronologyMode 'BOGUS' is invalid - must be one of: 'IS_BEFORE','IS_AFTER','IS_EQUAL'".to_owned() ]);
}

#[test]
fn modes_are_read_before_records() {
    let recorder = Arc::new(Recorder::default());
    let context = Context::default().with_logger(recorder.clone());

    let empty = Value::Struct(Record::new(&LOCALDATE));
    let result = Registry::standard().invoke(&context, "dt_localdate_chronology", &[ empty.clone(), empty, Value::from("is_before") ]);

    assert_eq!(result, Ok(Value::Null));
    assert_eq!(recorder.0.lock().unwrap().len(), 1);
}

#[test]
fn good_modes_log_nothing() {
    let recorder = Arc::new(Recorder::default());
    let context = Context::default().with_logger(recorder.clone());

    let instant = call(&context, "dt_instant", &[ Value::Long(0) ]);
    let result = call(&context, "dt_instant_chronology", &[ instant.clone(), instant, Value::from("IS_EQUAL") ]);

    assert_eq!(result, Value::Boolean(true));
    assert!(recorder.0.lock().unwrap().is_empty());
}

#[test]
fn null_operands_give_null() {
    let context = Context::default();
    let date = call(&context, "dt_localdate", &[ Value::from("2020-01-01") ]);

    assert_eq!(call(&context, "dt_localdate_chronology", &[ Value::Null, date.clone(), Value::from("IS_BEFORE") ]), Value::Null);
    assert_eq!(call(&context, "dt_localdate_chronology", &[ date, Value::Null, Value::from("IS_BEFORE") ]), Value::Null);
}
