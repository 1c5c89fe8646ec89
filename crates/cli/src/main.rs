use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use loglabel_kernel::settings::Settings;
use loglabel_kernel::{LoggerRegistry, PrefixedLoggers, Severity, TracingFacility};

#[derive(Debug, Parser)]
#[command(name = "loglabel", version, about = "Emit and inspect labeled log records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit one labeled record through the configured telemetry pipeline
    Emit {
        /// debug, info or warning
        #[arg(long, short, default_value = "info")]
        level: Severity,
        /// Label prepended to the message
        #[arg(long, short = 'L')]
        label: String,
        message: String,
    },
    /// Print the labels the project components bind under the configured format
    Labels,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load loglabel settings")?;

    match cli.command {
        Command::Emit {
            level,
            label,
            message,
        } => {
            let _guard = loglabel_telemetry::init(&settings.telemetry)
                .with_context(|| "failed to initialize telemetry")?;

            let loggers = PrefixedLoggers::new(
                label,
                Arc::new(TracingFacility),
                Arc::new(settings.labels.format()),
            );
            loggers.logger(level).call(&message);
        }
        Command::Labels => {
            let registry = LoggerRegistry::with_tracing(settings.labels.format());
            loglabel_app::modules::register_all(&registry);

            for label in registry.labels() {
                println!("{label}");
            }
        }
    }

    Ok(())
}
