//! Zone IDs: geographical regions with their own clock rules.

use crate::cal::{ZoneError, ZoneId};
use crate::error::{Error, Result};
use crate::functions::args::{encoded, text};
use crate::functions::context::Context;
use crate::functions::registry::Registry;
use crate::record::DataType::{self, Varchar};
use crate::record::schema::{ID_FIELD, ZONEID};


/// The zone of the context’s clock.
pub fn system(context: &Context) -> ZoneId {
    context.clock().zone()
}

/// Looks up a region, such as `Europe/Berlin`. A fixed offset written as
/// a zone isn’t a region, so isn’t accepted.
pub fn of(text: Option<&str>) -> Result<Option<ZoneId>> {
    require!(text);
    match text.parse() {
        Ok(zone)                           => Ok(Some(zone)),
        Err(e @ ZoneError::OffsetForm(_))  => Err(Error::invalid_field(ID_FIELD, e.to_string())),
        Err(e)                             => Err(Error::parse(text, e.to_string())),
    }
}


pub(crate) fn register(registry: &mut Registry) {
    let zoneid = DataType::Struct(&ZONEID);

    registry.add("dt_zoneid", &[], zoneid,
        "Create a ZoneId for the system’s time zone",
        |context, _| encoded(Ok(Some(system(context)))));
    registry.add("dt_zoneid", &[Varchar], zoneid,
        "Create a ZoneId from a region ID, such as Europe/Berlin",
        |_, args| encoded(of(text(args, 0))));
}
