//! Where “now” comes from.

use std::fmt;

use log::{debug, warn};

use crate::cal::{Error, LocalDate, LocalDateTime, LocalTime, ZoneId, ZonedDateTime};
use crate::instant::Instant;
use crate::system::{sys_time, sys_timezone};


/// A source of the current instant, and the zone it should be seen in.
pub trait Clock: Send + Sync + fmt::Debug {

    /// The current instant.
    fn now(&self) -> Instant;

    /// The zone whose wall clock “now” is read from.
    fn zone(&self) -> ZoneId;

    /// The current date and time, as seen in this clock’s zone.
    fn zoned_now(&self) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of_instant(self.now(), self.zone())
    }

    fn local_now(&self) -> Result<LocalDateTime, Error> {
        Ok(self.zoned_now()?.local())
    }

    fn today(&self) -> Result<LocalDate, Error> {
        Ok(self.local_now()?.date())
    }

    fn time_now(&self) -> Result<LocalTime, Error> {
        Ok(self.local_now()?.time())
    }
}


/// The operating system’s clock and time zone.
///
/// The zone falls back to UTC when the system doesn’t say, or names a
/// zone that isn’t known.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        let (seconds, nanos) = sys_time();
        Instant::of_epoch_second(seconds, nanos as i64).unwrap_or(Instant::EPOCH)
    }

    fn zone(&self) -> ZoneId {
        match sys_timezone() {
            Some(name) => name.parse().unwrap_or_else(|e| {
                warn!("System time zone {:?} is unusable ({}); using UTC", name, e);
                ZoneId::utc()
            }),
            None => {
                debug!("No system time zone found; using UTC");
                ZoneId::utc()
            }
        }
    }
}


/// A clock that’s stopped at one instant.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct FixedClock {
    instant: Instant,
    zone: ZoneId,
}

impl FixedClock {
    pub fn new(instant: Instant, zone: ZoneId) -> Self {
        Self { instant, zone }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.instant
    }

    fn zone(&self) -> ZoneId {
        self.zone
    }
}
