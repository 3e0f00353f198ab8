use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use siprelayd::{
    configuration::{
        load_configuration as load_named_configuration,
        Configuration,
        LoadedConfiguration,
        DEFAULT_CONFIGURATION_NAME,
    },
    logging::{initialize_tracing, parse_level_filter, LogFileOutput},
};
use tracing::{info, warn};

use crate::cli::CLIArgs;

mod cli;


const LOG_FILE_NAME_PREFIX: &str = "siprelayd.log";


fn load_configuration(cli_args: &CLIArgs) -> Result<LoadedConfiguration> {
    match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            info!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None if cli_args.configuration_name == DEFAULT_CONFIGURATION_NAME => {
            info!("Searching the default locations for the configuration file.");
            Configuration::load_from_default_paths()
        }
        None => {
            info!(
                "Searching for configuration \"{}\".",
                cli_args.configuration_name
            );
            load_named_configuration(&cli_args.configuration_name, true)
        }
    }
    .wrap_err("Failed to load configuration file.")
}


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let console_level_filter = parse_level_filter(&cli_args.log_level)?;
    let log_file_output = match cli_args.log_file_directory.as_ref() {
        Some(directory) => Some(LogFileOutput {
            level_filter: parse_level_filter(
                cli_args
                    .log_file_level
                    .as_deref()
                    .unwrap_or(&cli_args.log_level),
            )?,
            directory: directory.clone(),
            file_name_prefix: LOG_FILE_NAME_PREFIX.to_string(),
        }),
        None => None,
    };

    let logging_raii_guard = initialize_tracing(console_level_filter, log_file_output)
        .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let LoadedConfiguration {
        configuration,
        file_path,
        diagnostics,
    } = load_configuration(&cli_args)?;

    info!("Configuration loaded: {}.", file_path.display());

    if !diagnostics.is_empty() {
        warn!(
            "Configuration file {} has {} problem(s); affected settings keep their defaults.",
            file_path.display(),
            diagnostics.len()
        );

        if cli_args.strict {
            return Err(miette!(
                "Refusing to start: configuration file {} has {} problem(s).",
                file_path.display(),
                diagnostics.len()
            ));
        }
    }


    if cli_args.print_configuration {
        let rendered_configuration = toml::to_string_pretty(&configuration)
            .into_diagnostic()
            .wrap_err("Failed to render configuration as TOML.")?;

        print!("{}", rendered_configuration);
        return Ok(());
    }


    info!(
        "SIP listen port {}, RTP relay {} (ports {}-{}, timeout {}s), daemonize: {}.",
        configuration.sip_listen_port,
        if configuration.is_rtp_proxy_enabled() { "enabled" } else { "disabled" },
        configuration.rtp_port_low,
        configuration.rtp_port_high,
        configuration.rtp_timeout,
        configuration.is_daemonized(),
    );


    drop(logging_raii_guard);
    Ok(())
}
