#![crate_name = "datetime_functions"]
#![crate_type = "rlib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Calendar and clock functions over fixed-shape temporal records.
//!
//! A host calls functions by name, such as `dt_localdate_plus`, passing
//! positional `Value`s. Temporal values travel as `Record`s, one schema
//! per type; the functions decode them, do the work on native values,
//! and encode the result. A missing argument gives a missing result.
//!
//! # Examples
//!
//! ```
//! use datetime_functions::{Context, Registry, Value};
//!
//! let registry = Registry::standard();
//! let context = Context::default();
//!
//! let date = registry.invoke(&context, "dt_localdate", &[ Value::from("2020-01-31") ]).unwrap();
//! let later = registry.invoke(&context, "dt_localdate_plus", &[ date, Value::Int(0), Value::Int(1), Value::Int(0) ]).unwrap();
//! let text = registry.invoke(&context, "dt_localdate_format", &[ later ]).unwrap();
//!
//! assert_eq!(text, Value::from("2020-02-29"));
//! ```
//!
//! The typed functions can be used directly, too:
//!
//! ```
//! use datetime_functions::functions::period;
//! use datetime_functions::Period;
//!
//! let normal = period::normalize(Some(Period::of(1, 15, 10))).unwrap();
//! assert_eq!(normal, Some(Period::of(2, 3, 10)));
//! ```

pub mod cal;
mod clock;
mod duration;
mod error;
pub mod functions;
mod instant;
mod period;
pub mod record;
mod system;
mod util;

pub use crate::cal::{DatePiece, TimePiece};
pub use crate::cal::{LocalDate, LocalDateTime, LocalTime, Month, Weekday, Year};
pub use crate::cal::{OffsetDateTime, ZoneId, ZoneOffset, ZonedDateTime};
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::duration::Duration;
pub use crate::error::{Error, Result};
pub use crate::functions::{Context, Registry};
pub use crate::instant::Instant;
pub use crate::period::Period;
pub use crate::record::{Record, Value};
