use std::ops::RangeInclusive;
use std::sync::Arc;

use loglabel_kernel::{logd, logw, Labeled, LoggerRegistry, PrefixedLoggers};

/// A gauge that accepts readings within a calibrated range.
#[derive(Debug)]
pub struct Gauge {
    range: RangeInclusive<f64>,
    last: Option<f64>,
    loggers: Arc<PrefixedLoggers>,
}

impl Gauge {
    pub fn new(range: RangeInclusive<f64>) -> Self {
        Self::with_registry(range, crate::utils::registry())
    }

    pub fn with_registry(range: RangeInclusive<f64>, registry: &LoggerRegistry) -> Self {
        Self {
            range,
            last: None,
            loggers: registry.bind::<Self>(),
        }
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    /// Record `value` if it is in range; out-of-range readings are logged and dropped.
    pub fn record(&mut self, value: f64) -> bool {
        if !self.range.contains(&value) {
            logw!(
                self,
                "reading {} outside {}..={}",
                value,
                self.range.start(),
                self.range.end()
            );
            return false;
        }

        logd!(self, "reading {}", value);
        self.last = Some(value);
        true
    }
}

impl Labeled for Gauge {
    fn loggers(&self) -> &PrefixedLoggers {
        &self.loggers
    }
}
