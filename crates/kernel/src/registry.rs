use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::binding::PrefixedLoggers;
use crate::facility::{LogFacility, TracingFacility};
use crate::format::LabelFormat;

/// Per-type cache of prefixed loggers over one injected facility.
pub struct LoggerRegistry {
    facility: Arc<dyn LogFacility>,
    format: Arc<LabelFormat>,
    bindings: RwLock<HashMap<TypeId, Arc<PrefixedLoggers>>>,
}

impl LoggerRegistry {
    /// Create a registry that binds every type against `facility`.
    pub fn new(facility: Arc<dyn LogFacility>, format: LabelFormat) -> Self {
        Self {
            facility,
            format: Arc::new(format),
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry over the `tracing` dispatcher.
    pub fn with_tracing(format: LabelFormat) -> Self {
        Self::new(Arc::new(TracingFacility), format)
    }

    pub fn format(&self) -> &LabelFormat {
        &self.format
    }

    /// Loggers for `T`, bound on first call and shared afterwards.
    ///
    /// Every later call returns the same `Arc` from a read-locked lookup.
    pub fn bind<T: ?Sized + 'static>(&self) -> Arc<PrefixedLoggers> {
        self.bind_with::<T>(|format| format.label_for::<T>())
    }

    /// Like [`bind`](Self::bind) but with an explicit label. The first binding
    /// of a type wins; later calls return it regardless of `label`.
    pub fn bind_as<T: ?Sized + 'static>(&self, label: &str) -> Arc<PrefixedLoggers> {
        self.bind_with::<T>(|_| label.to_string())
    }

    /// Loggers for `T` if it was bound before.
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<PrefixedLoggers>> {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
    }

    /// Number of bound types.
    pub fn len(&self) -> usize {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of every bound type, sorted.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|loggers| loggers.owner().to_string())
            .collect();
        labels.sort();
        labels
    }

    fn bind_with<T: ?Sized + 'static>(
        &self,
        label: impl FnOnce(&LabelFormat) -> String,
    ) -> Arc<PrefixedLoggers> {
        let key = TypeId::of::<T>();

        if let Some(existing) = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(existing);
        }

        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have bound `T` between the two locks.
        let loggers = bindings.entry(key).or_insert_with(|| {
            let owner = label(&self.format);
            tracing::debug!(owner = %owner, "binding prefixed loggers");
            Arc::new(PrefixedLoggers::new(
                owner,
                Arc::clone(&self.facility),
                Arc::clone(&self.format),
            ))
        });

        Arc::clone(loggers)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::with_tracing(LabelFormat::default())
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("format", &self.format)
            .field("labels", &self.labels())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{CaptureFacility, Record};
    use crate::severity::Severity;

    struct Widget;
    struct Gauge;

    fn registry() -> (CaptureFacility, LoggerRegistry) {
        let capture = CaptureFacility::new();
        let registry = LoggerRegistry::new(Arc::new(capture.clone()), LabelFormat::default());
        (capture, registry)
    }

    #[test]
    fn test_registry_creation() {
        let (_, registry) = registry();
        assert!(registry.is_empty());
        assert!(registry.get::<Widget>().is_none());
    }

    #[test]
    fn test_bind_is_idempotent() {
        let (_, registry) = registry();

        let first = registry.bind::<Widget>();
        let second = registry.bind::<Widget>();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.labels(), vec!["Widget"]);
    }

    #[test]
    fn test_bindings_are_isolated_per_type() {
        let (capture, registry) = registry();

        let widget = registry.bind::<Widget>();
        let gauge = registry.bind::<Gauge>();
        widget.info("one");
        gauge.warning("two");

        assert_eq!(widget.owner(), "Widget");
        assert_eq!(gauge.owner(), "Gauge");
        assert_eq!(registry.labels(), vec!["Gauge", "Widget"]);
        assert_eq!(
            capture.records(),
            vec![
                Record::new(Severity::Info, "Widget: one"),
                Record::new(Severity::Warning, "Gauge: two"),
            ]
        );
    }

    #[test]
    fn test_first_binding_wins() {
        let (_, registry) = registry();

        let named = registry.bind_as::<Widget>("SpinningWidget");
        let derived = registry.bind::<Widget>();

        assert_eq!(named.owner(), "SpinningWidget");
        assert!(Arc::ptr_eq(&named, &derived));
    }

    #[test]
    fn test_concurrent_binding_shares_one_entry() {
        let (_, registry) = registry();

        let bound: Vec<Arc<PrefixedLoggers>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.bind::<Widget>()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("binding thread panicked"))
                .collect()
        });

        assert_eq!(registry.len(), 1);
        assert!(bound.iter().all(|loggers| Arc::ptr_eq(loggers, &bound[0])));
    }
}
