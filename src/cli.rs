//! Command-line interface definitions for the daemon binary.

use std::path::PathBuf;

use clap::Parser;
use siprelayd::configuration::DEFAULT_CONFIGURATION_NAME;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "siprelayd",
    author,
    about = "SIP relay daemon.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, the configuration file is searched for instead.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. If unspecified, ~/.siprelaydrc, \
                /etc/siprelayd.conf, /usr/etc/siprelayd.conf and /usr/local/etc/siprelayd.conf \
                are tried in that order."
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        short = 'n',
        long = "configuration-name",
        default_value = DEFAULT_CONFIGURATION_NAME,
        help = "Base name used when searching for the configuration file."
    )]
    pub configuration_name: String,

    #[arg(
        long = "log-level",
        default_value = "info",
        help = "Console log level filter (tracing EnvFilter syntax), e.g. \"debug\" or \"siprelayd=trace\"."
    )]
    pub log_level: String,

    #[arg(
        long = "log-file-level",
        help = "Log file level filter (tracing EnvFilter syntax). Defaults to the console log level."
    )]
    pub log_file_level: Option<String>,

    #[arg(
        long = "log-file-directory",
        help = "If specified, logs are additionally written to a daily rotated file in this directory."
    )]
    pub log_file_directory: Option<PathBuf>,

    #[arg(
        long = "print-configuration",
        help = "If this flag is present, the effective configuration is printed as TOML \
                and the program exits."
    )]
    pub print_configuration: bool,

    #[arg(
        long = "strict",
        help = "Refuse to start if the configuration file contains any problems."
    )]
    pub strict: bool,
}


#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        CLIArgs::command().debug_assert();
    }

    #[test]
    fn defaults_to_search_mode() {
        let arguments = CLIArgs::parse_from(["siprelayd"]);

        assert!(arguments.configuration_file_path.is_none());
        assert_eq!(arguments.configuration_name, "siprelayd");
        assert_eq!(arguments.log_level, "info");
        assert!(arguments.log_file_level.is_none());
        assert!(!arguments.print_configuration);
        assert!(!arguments.strict);
    }

    #[test]
    fn accepts_an_explicit_configuration_file() {
        let arguments = CLIArgs::parse_from(["siprelayd", "-c", "/tmp/relay.conf", "--strict"]);

        assert_eq!(
            arguments.configuration_file_path,
            Some(PathBuf::from("/tmp/relay.conf"))
        );
        assert!(arguments.strict);
    }

    #[test]
    fn log_file_level_is_independent_of_the_console_level() {
        let arguments = CLIArgs::parse_from([
            "siprelayd",
            "--log-level",
            "warn",
            "--log-file-directory",
            "/tmp/siprelayd-logs",
            "--log-file-level",
            "siprelayd=trace",
        ]);

        assert_eq!(arguments.log_level, "warn");
        assert_eq!(arguments.log_file_level.as_deref(), Some("siprelayd=trace"));
    }
}
