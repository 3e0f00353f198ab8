//! Tracing setup: console output on stderr and optional file output.

use std::path::PathBuf;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Where (and how verbosely) to write the log file.
#[derive(Debug)]
pub struct LogFileOutput {
    pub level_filter: EnvFilter,

    pub directory: PathBuf,

    /// File name prefix; the appender appends the date.
    pub file_name_prefix: String,
}


/// Parses a level filter directive (e.g. `info` or `siprelayd=debug,warn`).
pub fn parse_level_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to parse log level filter \"{}\".", directive))
}


/// Installs the global tracing subscriber.
///
/// The returned guard (present only with file output) must be kept alive for
/// as long as logs should be flushed to the file.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_output: Option<LogFileOutput>,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level_filter);


    let (file_layer, guard) = match log_file_output {
        Some(output) => {
            std::fs::create_dir_all(&output.directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create missing log directory at {}.",
                        output.directory.display()
                    )
                })?;

            let file_appender =
                tracing_appender::rolling::daily(&output.directory, &output.file_name_prefix);
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_appender)
                .with_filter(output.level_filter);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install the global tracing subscriber.")?;

    Ok(guard)
}
