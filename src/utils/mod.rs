//! Project-specific utilities live here.

use anyhow::bail;
use loglabel_kernel::{LabelFormat, LoggerRegistry};
use once_cell::sync::OnceCell;

static REGISTRY: OnceCell<LoggerRegistry> = OnceCell::new();

/// Install the process-wide registry with `format`.
///
/// Fails if a registry with a different format is already in place, e.g. when
/// a component was built through [`registry`] before settings were applied.
pub fn install_registry(format: LabelFormat) -> anyhow::Result<&'static LoggerRegistry> {
    install_into(&REGISTRY, format)
}

/// Process-wide registry over the `tracing` dispatcher, installed with the
/// default format if nothing was installed yet.
pub fn registry() -> &'static LoggerRegistry {
    REGISTRY.get_or_init(LoggerRegistry::default)
}

fn install_into(
    cell: &OnceCell<LoggerRegistry>,
    format: LabelFormat,
) -> anyhow::Result<&LoggerRegistry> {
    let existing = match cell.try_insert(LoggerRegistry::with_tracing(format.clone())) {
        Ok(installed) => return Ok(installed),
        Err((existing, _)) => existing,
    };

    if *existing.format() != format {
        bail!(
            "logger registry already installed with {:?}; cannot switch to {:?}",
            existing.format(),
            format
        );
    }

    Ok(existing)
}

#[cfg(test)]
mod tests {
    use loglabel_kernel::NameStyle;

    use super::*;
    use crate::modules::Widget;

    // The only test touching the process-wide registry.
    #[test]
    fn building_a_component_first_blocks_a_different_format() {
        let _widget = Widget::new("sda", 1);

        let err = install_registry(LabelFormat::new(" | ", NameStyle::Qualified)).unwrap_err();

        assert!(err.to_string().contains("already installed"), "{err}");
        assert_eq!(registry().format().separator(), ": ");
        assert!(install_registry(LabelFormat::default()).is_ok());
    }

    #[test]
    fn install_applies_configured_format() {
        let cell = OnceCell::new();
        let format = LabelFormat::new(" | ", NameStyle::Qualified);

        let installed = install_into(&cell, format).unwrap();

        assert_eq!(installed.format().separator(), " | ");
        assert_eq!(installed.format().name_style(), NameStyle::Qualified);
    }

    #[test]
    fn install_after_default_registry_with_other_format_fails() {
        let cell = OnceCell::new();
        cell.get_or_init(LoggerRegistry::default);
        let format = LabelFormat::new(" | ", NameStyle::Qualified);

        let err = install_into(&cell, format).unwrap_err();

        assert!(err.to_string().contains("already installed"), "{err}");
        assert_eq!(cell.get().unwrap().format().separator(), ": ");
    }

    #[test]
    fn install_with_matching_format_reuses_registry() {
        let cell = OnceCell::new();
        let first = install_into(&cell, LabelFormat::default()).unwrap();
        let second = install_into(&cell, LabelFormat::default()).unwrap();

        assert!(std::ptr::eq(first, second));
    }
}
