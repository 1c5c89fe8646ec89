use std::sync::Arc;

use loglabel_kernel::{logd, logi, logw, Labeled, LoggerRegistry, PrefixedLoggers};

/// A storage widget that reports its fill level.
#[derive(Debug)]
pub struct Widget {
    name: String,
    capacity: u64,
    used: u64,
    loggers: Arc<PrefixedLoggers>,
}

impl Widget {
    pub fn new(name: impl Into<String>, capacity: u64) -> Self {
        Self::with_registry(name, capacity, crate::utils::registry())
    }

    pub fn with_registry(
        name: impl Into<String>,
        capacity: u64,
        registry: &LoggerRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            used: 0,
            loggers: registry.bind::<Self>(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    /// Store `bytes`, clamped to the remaining capacity. Returns how much was stored.
    pub fn store(&mut self, bytes: u64) -> u64 {
        let stored = bytes.min(self.capacity - self.used);
        self.used += stored;
        logd!(self, "{}: stored {} of {} bytes", self.name, stored, bytes);

        if self.used == self.capacity {
            self.logw("disk full");
        } else {
            logi!(self, "{}: {}/{} bytes used", self.name, self.used, self.capacity);
        }

        if stored < bytes {
            logw!(self, "{}: dropped {} bytes", self.name, bytes - stored);
        }

        stored
    }
}

impl Labeled for Widget {
    fn loggers(&self) -> &PrefixedLoggers {
        &self.loggers
    }
}

#[cfg(test)]
mod tests {
    use loglabel_kernel::{CaptureFacility, LabelFormat, Record, Severity};

    use super::*;

    fn registry() -> (CaptureFacility, LoggerRegistry) {
        let capture = CaptureFacility::new();
        let registry = LoggerRegistry::new(Arc::new(capture.clone()), LabelFormat::default());
        (capture, registry)
    }

    #[test]
    fn logw_emits_one_labeled_warning() {
        let (capture, registry) = registry();

        Widget::with_registry("sda", 10, &registry).logw("disk full");

        assert_eq!(
            capture.records(),
            vec![Record::new(Severity::Warning, "Widget: disk full")]
        );
    }

    #[test]
    fn store_reports_fill_level() {
        let (capture, registry) = registry();
        let mut widget = Widget::with_registry("sda", 10, &registry);

        assert_eq!(widget.store(4), 4);
        assert_eq!(widget.store(8), 6);
        assert_eq!(widget.used(), 10);

        assert_eq!(
            capture.messages_at(Severity::Info),
            vec!["Widget: sda: 4/10 bytes used"]
        );
        assert_eq!(
            capture.messages_at(Severity::Warning),
            vec!["Widget: disk full", "Widget: sda: dropped 2 bytes"]
        );
        assert_eq!(capture.messages_at(Severity::Debug).len(), 2);
    }

    #[test]
    fn widgets_share_one_binding() {
        let (_, registry) = registry();

        let a = Widget::with_registry("sda", 1, &registry);
        let b = Widget::with_registry("sdb", 1, &registry);

        assert!(Arc::ptr_eq(&a.loggers, &b.loggers));
        assert_eq!(registry.len(), 1);
    }
}
