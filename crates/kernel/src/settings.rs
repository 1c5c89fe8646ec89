use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::format::{LabelFormat, NameStyle};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "LOGLABEL_ENV";
const CONFIG_DIR_ENV: &str = "LOGLABEL_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub labels: LabelSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to the `config` directory under the working directory.
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(config_dir)
    }

    /// Load configuration with `config_dir` holding `base.toml` and the
    /// per-environment overlays.
    pub fn load_from(config_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let config_dir = config_dir.into();
        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());

        let base_path = config_dir.join("base.toml");
        let environment_filename = format!("{}.toml", environment);
        let environment_path = config_dir.join(environment_filename);

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("LOGLABEL")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `debug,config=warn`.
    #[serde(default = "TelemetrySettings::default_level")]
    pub level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Mirror every record into this file as well as the console.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl TelemetrySettings {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            log_format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelSettings {
    #[serde(default = "LabelSettings::default_separator")]
    pub separator: String,
    #[serde(default)]
    pub name_style: NameStyle,
}

impl LabelSettings {
    fn default_separator() -> String {
        LabelFormat::DEFAULT_SEPARATOR.to_string()
    }

    pub fn format(&self) -> LabelFormat {
        LabelFormat::new(self.separator.clone(), self.name_style)
    }
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            separator: Self::default_separator(),
            name_style: NameStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_telemetry_is_pretty_info_console_only() {
        let settings = Settings::default();
        assert_eq!(settings.telemetry.level, "info");
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
        assert!(settings.telemetry.log_file.is_none());
    }

    #[test]
    fn default_labels_match_default_format() {
        let settings = Settings::default();
        assert_eq!(settings.labels.format(), LabelFormat::default());
    }

    #[test]
    fn base_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("base.toml"),
            concat!(
                "[telemetry]\nlevel = \"debug\"\nlog_format = \"json\"\n\n",
                "[labels]\nseparator = \" | \"\nname_style = \"qualified\"\n",
            ),
        )
        .expect("write base.toml");

        let settings = Settings::load_from(dir.path()).expect("load settings");

        assert_eq!(settings.telemetry.level, "debug");
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        assert_eq!(
            settings.labels.format(),
            LabelFormat::new(" | ", NameStyle::Qualified)
        );
    }
}
