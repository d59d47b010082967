//! Records: the fixed-shape encoding of every temporal value that’s passed
//! to and from the host.
//!
//! Each temporal type has one schema, listing its fields in order. Leaf
//! types hold integers or strings; composite types hold the records of
//! their parts, so a local date-time record holds a local date record and
//! a local time record. Within a populated record every field has a value.

mod convert;
pub mod schema;
mod value;

pub use self::convert::{FromRecord, ToRecord};
pub use self::schema::{DataType, FieldSchema, StructSchema};
pub use self::value::{Record, Value};
