//! Turning dates and times into text.
//!
//! Every value has one canonical ISO-8601 form, available through the
//! `ISO` trait; the `custom` module handles user-supplied patterns.

pub mod custom;
mod iso;

pub use self::iso::{ISO, ISOString};
