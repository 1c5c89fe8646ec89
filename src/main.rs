use anyhow::Context;
use loglabel_app::modules::{self, Gauge, Widget};
use loglabel_app::utils;
use loglabel_kernel::settings::Settings;
use loglabel_kernel::Labeled;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load loglabel settings")?;
    let _telemetry = loglabel_telemetry::init(&settings.telemetry)
        .with_context(|| "failed to initialize telemetry")?;

    tracing::info!(
        env = ?settings.environment,
        separator = %settings.labels.separator,
        name_style = ?settings.labels.name_style,
        "loglabel-app bootstrap starting"
    );

    let registry = utils::install_registry(settings.labels.format())
        .with_context(|| "failed to install logger registry")?;
    modules::register_all(registry);

    let mut widget = Widget::new("sda", 64);
    widget.logi("mounted");
    widget.store(48);
    widget.store(32);

    let mut gauge = Gauge::new(0.0..=100.0);
    gauge.record(42.0);
    gauge.record(140.0);

    tracing::info!(labels = ?registry.labels(), "loglabel-app bootstrap complete");
    Ok(())
}
