use std::fmt::{self, Display};
use std::sync::Arc;

use crate::facility::LogFacility;
use crate::format::LabelFormat;
use crate::severity::Severity;

/// A facility entry point with its label fixed in advance.
#[derive(Clone)]
pub struct BoundLogger {
    label: Arc<str>,
    severity: Severity,
    facility: Arc<dyn LogFacility>,
    format: Arc<LabelFormat>,
}

impl BoundLogger {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Emit `message` at this logger's severity with the label prepended.
    pub fn call(&self, message: impl Display) {
        let rendered = self.format.render(&self.label, message);
        self.facility.log(self.severity, &rendered);
    }
}

impl fmt::Debug for BoundLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundLogger")
            .field("label", &self.label)
            .field("severity", &self.severity)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Fix `label` in front of one severity of `facility`.
pub fn prepend_log(
    label: impl Into<Arc<str>>,
    severity: Severity,
    facility: Arc<dyn LogFacility>,
    format: Arc<LabelFormat>,
) -> BoundLogger {
    BoundLogger {
        label: label.into(),
        severity,
        facility,
        format,
    }
}

/// The three shortcut loggers a labeled type carries.
#[derive(Debug, Clone)]
pub struct PrefixedLoggers {
    owner: Arc<str>,
    logi: BoundLogger,
    logd: BoundLogger,
    logw: BoundLogger,
}

impl PrefixedLoggers {
    pub fn new(
        owner: impl Into<Arc<str>>,
        facility: Arc<dyn LogFacility>,
        format: Arc<LabelFormat>,
    ) -> Self {
        let owner = owner.into();
        let bind = |severity| {
            prepend_log(
                Arc::clone(&owner),
                severity,
                Arc::clone(&facility),
                Arc::clone(&format),
            )
        };

        let logi = bind(Severity::Info);
        let logd = bind(Severity::Debug);
        let logw = bind(Severity::Warning);

        Self {
            owner,
            logi,
            logd,
            logw,
        }
    }

    /// Bind under the label `format` derives from `T`'s type name.
    pub fn for_type<T: ?Sized>(
        facility: Arc<dyn LogFacility>,
        format: Arc<LabelFormat>,
    ) -> Self {
        let owner = format.label_for::<T>();
        Self::new(owner, facility, format)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn logger(&self, severity: Severity) -> &BoundLogger {
        match severity {
            Severity::Info => &self.logi,
            Severity::Debug => &self.logd,
            Severity::Warning => &self.logw,
        }
    }

    pub fn info(&self, message: impl Display) {
        self.logi.call(message);
    }

    pub fn debug(&self, message: impl Display) {
        self.logd.call(message);
    }

    pub fn warning(&self, message: impl Display) {
        self.logw.call(message);
    }
}
