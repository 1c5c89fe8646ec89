pub mod gauge;
pub mod widget;

use loglabel_kernel::LoggerRegistry;

pub use gauge::Gauge;
pub use widget::Widget;

/// Bind every project component against `registry` up front.
pub fn register_all(registry: &LoggerRegistry) {
    registry.bind::<Widget>();
    registry.bind::<Gauge>();
    tracing::debug!(components = registry.len(), "project components bound");
}
