//! What functions get to see of the world outside their arguments.

use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};


/// Somewhere to report problems that don’t stop a function from
/// returning.
pub trait Logger: Send + Sync + fmt::Debug {
    fn error(&self, message: &str);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}


/// The clock and logger every function invocation runs with.
///
/// The default context reads the system clock and logs through `log`.
/// Tests usually swap in a `FixedClock` and a logger that records what
/// it was told.
#[derive(Debug, Clone)]
pub struct Context {
    clock: Arc<dyn Clock>,
    logger: Arc<dyn Logger>,
}

impl Context {
    pub fn new(clock: Arc<dyn Clock>, logger: Arc<dyn Logger>) -> Self {
        Self { clock, logger }
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        Self { clock: Arc::new(clock), ..self }
    }

    pub fn with_logger(self, logger: Arc<dyn Logger>) -> Self {
        Self { logger, ..self }
    }

    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    pub fn logger(&self) -> &dyn Logger {
        &*self.logger
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(LogLogger))
    }
}
