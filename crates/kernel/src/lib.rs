//! Labeled loggers for project types.
//!
//! A type binds a [`PrefixedLoggers`] record through a [`LoggerRegistry`] once
//! and then logs through the [`Labeled`] shortcuts (or the `logi!`, `logd!`,
//! `logw!` macros); every message is prefixed with the type's name under the
//! registry's [`LabelFormat`].

pub mod binding;
pub mod facility;
pub mod format;
pub mod labeled;
pub mod registry;
pub mod settings;
pub mod severity;

pub use binding::{prepend_log, BoundLogger, PrefixedLoggers};
pub use facility::{CaptureFacility, LogFacility, Record, TracingFacility};
pub use format::{LabelFormat, NameStyle};
pub use labeled::Labeled;
pub use registry::LoggerRegistry;
pub use severity::Severity;
