//! Values passed between the host and the functions.

use std::fmt;

use crate::error::{Error, Result};
use crate::record::schema::{DataType, StructSchema};


/// A single argument or result.
#[derive(PartialEq, Debug, Clone)]
pub enum Value {
    Null,
    Int(i32),
    Long(i64),
    Boolean(bool),
    String(String),
    Struct(Record),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value could be passed where the given type is expected.
    /// Null fits anywhere, and an `Int` widens to a `BigInt`.
    pub fn fits(&self, kind: DataType) -> bool {
        match (self, kind) {
            (Value::Null, _)                           => true,
            (Value::Int(_), DataType::Integer)         => true,
            (Value::Int(_), DataType::BigInt)          => true,
            (Value::Long(_), DataType::BigInt)         => true,
            (Value::Boolean(_), DataType::Boolean)     => true,
            (Value::String(_), DataType::Varchar)      => true,
            (Value::Struct(r), DataType::Struct(s))    => r.schema() == s,
            (Value::Array(items), DataType::Array(s))  => items.iter().all(|item| item.fits(DataType::Struct(s))),
            _                                          => false,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Value::Int(i) => Some(i),
            _             => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Value::Int(i)  => Some(i as i64),
            Value::Long(l) => Some(l),
            _              => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Boolean(b) => Some(b),
            _                 => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _                => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Struct(r) => Some(r),
            _                => None,
        }
    }

    /// The records in an array, or nothing if the array, or any record in
    /// it, is missing.
    pub fn as_records(&self) -> Option<Vec<&Record>> {
        match self {
            Value::Array(items) => items.iter().map(Value::as_record).collect(),
            _                   => None,
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Struct(record)
    }
}

impl<T> From<Option<T>> for Value where T: Into<Value> {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i) }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self { Value::Long(l) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Boolean(b) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_owned()) }
}


/// A populated record: one value for each field of its schema, in order.
#[derive(PartialEq, Clone)]
pub struct Record {
    schema: &'static StructSchema,
    values: Vec<Value>,
}

impl Record {

    /// A record with every field set to null, ready to be filled in.
    pub fn new(schema: &'static StructSchema) -> Self {
        Self { schema, values: vec![Value::Null; schema.fields.len()] }
    }

    /// Builds a record from values already known to fit the schema.
    pub(crate) fn from_values(schema: &'static StructSchema, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.fields.len(), values.len());
        Self { schema, values }
    }

    pub fn schema(&self) -> &'static StructSchema {
        self.schema
    }

    /// Sets a field, checking that the schema has it and that the value
    /// has the right type. An `Int` put into a `BIGINT` field is stored as
    /// a `Long`.
    pub fn put(mut self, name: &'static str, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();

        let (index, field) = self.schema.field(name)
            .ok_or_else(|| Error::invalid_field(name, format!("not a field of {}", self.schema.name)))?;

        if ! value.fits(field.kind) {
            return Err(Error::invalid_field(name, format!("expected {}", field.kind)));
        }

        self.values[index] = match (value, field.kind) {
            (Value::Int(i), DataType::BigInt) => Value::Long(i64::from(i)),
            (value, _)                        => value,
        };
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.field(name).map(|(index, _)| &self.values[index])
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in self.schema.fields.iter().zip(&self.values) {
            let _ = map.entry(&field.name, value);
        }
        map.finish()
    }
}


#[cfg(test)]
mod test {
    use super::{Record, Value};
    use crate::error::Error;
    use crate::record::schema::{DataType, DURATION, INSTANT, NANOS_FIELD, PERIOD, SECONDS_FIELD, YEAR_FIELD};

    #[test]
    fn put_and_get() {
        let record = Record::new(&INSTANT).put(SECONDS_FIELD, 5_i64).unwrap();
        assert_eq!(record.get(SECONDS_FIELD), Some(&Value::Long(5)));
        assert_eq!(record.get(NANOS_FIELD), Some(&Value::Null));
    }

    #[test]
    fn put_widens_ints() {
        let record = Record::new(&DURATION).put(SECONDS_FIELD, 5).unwrap()
                                           .put(NANOS_FIELD, 0).unwrap();
        assert_eq!(record.get(SECONDS_FIELD), Some(&Value::Long(5)));
        assert_eq!(record.get(NANOS_FIELD), Some(&Value::Int(0)));
    }

    #[test]
    fn put_wrong_type() {
        let result = Record::new(&INSTANT).put(NANOS_FIELD, "five");
        assert!(matches!(result, Err(Error::InvalidField { field: NANOS_FIELD, .. })));
    }

    #[test]
    fn put_unknown_field() {
        let result = Record::new(&INSTANT).put(YEAR_FIELD, 2020);
        assert!(matches!(result, Err(Error::InvalidField { field: YEAR_FIELD, .. })));
    }

    #[test]
    fn fits_by_shape() {
        let instant = Value::Struct(Record::new(&INSTANT));
        assert!(instant.fits(DataType::Struct(&DURATION)));
        assert!(! instant.fits(DataType::Struct(&PERIOD)));
        assert!(Value::Null.fits(DataType::Varchar));
        assert!(Value::Int(1).fits(DataType::BigInt));
        assert!(! Value::Long(1).fits(DataType::Integer));
    }

    #[test]
    fn arrays_with_a_hole() {
        let array = Value::Array(vec![ Value::Struct(Record::new(&PERIOD)), Value::Null ]);
        assert!(array.fits(DataType::Array(&PERIOD)));
        assert_eq!(array.as_records(), None);
    }
}
