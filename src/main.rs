//! Doppler CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use doppler::api::ApiClient;
use doppler::cli::{Cli, CommandDispatcher, CommandResult};
use doppler::config::{ConfigFile, Settings};
use doppler::shell::is_ci;
use doppler::telemetry::TracingTelemetry;
use doppler::ui::{create_ui, OutputMode, UserInterface};
use doppler::updates::PROGRAM_VERSION;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("doppler=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doppler=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(
    cli: &Cli,
    settings: &Settings,
    ui: &mut dyn UserInterface,
) -> doppler::Result<CommandResult> {
    let mut config = ConfigFile::load(&settings.config_path)?;
    let client = ApiClient::new(settings)?;
    let telemetry = TracingTelemetry;

    let mut dispatcher = CommandDispatcher::new(settings, &client, &mut config, &telemetry);
    dispatcher.dispatch(cli, ui)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = cli.settings();
    init_tracing(settings.debug);

    tracing::debug!("Doppler CLI {} starting with args: {:?}", PROGRAM_VERSION, cli);

    let mut ui = create_ui(!is_ci(), OutputMode::from_json_flag(settings.json));

    match run(&cli, &settings, ui.as_mut()) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&e.to_string());
            if settings.debug {
                if let Some(detail) = e.detail() {
                    eprintln!("{}", detail);
                }
            }
            ExitCode::from(1)
        }
    }
}
