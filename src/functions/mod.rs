//! The functions themselves, one module per temporal type.
//!
//! Each function comes in two forms. The typed form, such as
//! `localdate::plus`, takes and returns native values; every argument is
//! optional, and a missing argument makes the result missing too, without
//! anything being computed. The other form is the entry in the
//! `Registry`, which decodes records, calls the typed form, and encodes
//! the result.


/// Unwraps each of the named optional arguments in place, or returns
/// `Ok(None)` from the enclosing function if any one of them is missing.
macro_rules! require {
    ($($arg:ident),+ $(,)?) => {
        $( let Some($arg) = $arg else { return Ok(None) }; )+
    };
}

pub(crate) mod args;
pub mod chronology;
mod context;
mod registry;

pub mod duration;
pub mod instant;
pub mod localdate;
pub mod localdatetime;
pub mod localtime;
pub mod offsetdatetime;
pub mod period;
pub mod zoneddatetime;
pub mod zoneid;
pub mod zoneoffset;

pub use self::chronology::{Chronology, ChronologyMode};
pub use self::context::{Context, LogLogger, Logger};
pub use self::registry::{Call, Registry, Signature, NAMESPACE};
