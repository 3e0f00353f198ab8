use std::{
    ffi::OsStr,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{
    diagnostics::{ConfigurationDiagnostic, ConfigurationDiagnostics, DiagnosticKind},
    dispatch::match_and_apply,
    error::ConfigurationLoadError,
    reader::ConfigurationLines,
    registry::FieldRegistry,
    resolver::PathResolver,
    structure::Configuration,
};


/// Base name used when searching for the daemon's configuration file.
pub const DEFAULT_CONFIGURATION_NAME: &str = "siprelayd";


/// Outcome of a successful load into a caller-owned [`Configuration`].
#[derive(Clone, Debug)]
pub struct LoadReport {
    /// The file the configuration was read from (canonicalized where possible).
    pub file_path: PathBuf,

    /// Non-fatal problems found in the file.
    pub diagnostics: ConfigurationDiagnostics,
}


/// A freshly loaded configuration, along with where it came from.
#[derive(Clone, Debug)]
pub struct LoadedConfiguration {
    pub configuration: Configuration,

    pub file_path: PathBuf,

    pub diagnostics: ConfigurationDiagnostics,
}


/// Locates a configuration file and applies its directives.
#[derive(Clone, Debug)]
pub struct ConfigurationLoader<'r> {
    resolver: PathResolver,
    registry: FieldRegistry<'r>,
}

impl ConfigurationLoader<'static> {
    /// A loader using the daemon's keyword registry and the process environment.
    pub fn new() -> Self {
        Self {
            resolver: PathResolver::from_environment(),
            registry: FieldRegistry::daemon(),
        }
    }
}

impl Default for ConfigurationLoader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> ConfigurationLoader<'r> {
    #[must_use = "returns a loader with the new resolver"]
    pub fn with_resolver(mut self, resolver: PathResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Opens the configuration file for `name` (see [`PathResolver`]) and applies
    /// every directive in it to `configuration`.
    ///
    /// Only failing to open a file at all is an error. Problems inside the file
    /// are collected in the returned [`LoadReport`] and the affected fields keep
    /// their previous values.
    pub fn load_into<N>(
        &self,
        configuration: &mut Configuration,
        name: N,
        search: bool,
    ) -> Result<LoadReport, ConfigurationLoadError>
    where
        N: AsRef<OsStr>,
    {
        debug!("Trying to read configuration file.");

        let (opened_path, file) = self.resolver.resolve(name, search)?;

        let diagnostics = self.parse_into(BufReader::new(file), configuration);

        let file_path = canonicalize_or_keep(opened_path);
        info!(
            "Loaded configuration from {} ({} diagnostic(s)).",
            file_path.display(),
            diagnostics.len()
        );

        Ok(LoadReport {
            file_path,
            diagnostics,
        })
    }

    /// Like [`Self::load_into`], but starts from [`Configuration::default`].
    pub fn load<N>(&self, name: N, search: bool) -> Result<LoadedConfiguration, ConfigurationLoadError>
    where
        N: AsRef<OsStr>,
    {
        let mut configuration = Configuration::default();
        let LoadReport {
            file_path,
            diagnostics,
        } = self.load_into(&mut configuration, name, search)?;

        Ok(LoadedConfiguration {
            configuration,
            file_path,
            diagnostics,
        })
    }

    /// Applies every directive readable from `reader` to `configuration`.
    pub fn parse_into<R>(&self, reader: R, configuration: &mut Configuration) -> ConfigurationDiagnostics
    where
        R: BufRead,
    {
        let mut diagnostics = ConfigurationDiagnostics::new();

        for line in ConfigurationLines::new(reader) {
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    diagnostics.report(ConfigurationDiagnostic::without_line(
                        DiagnosticKind::ReadFailed {
                            reason: error.to_string(),
                        },
                    ));
                    break;
                }
            };

            debug!("Parsing line {}: \"{}\".", line.number, line.text);

            let outcome = match_and_apply(&line.text, &self.registry, configuration);

            if let Some(kind) = DiagnosticKind::from_outcome(outcome) {
                diagnostics.report(ConfigurationDiagnostic::for_line(
                    kind,
                    line.number,
                    line.text,
                ));
            }
        }

        diagnostics
    }
}


fn canonicalize_or_keep(path: PathBuf) -> PathBuf {
    match dunce::canonicalize(&path) {
        Ok(canonical_path) => canonical_path,
        Err(error) => {
            debug!(
                "Could not canonicalize configuration file path {}: {}.",
                path.display(),
                error
            );
            path
        }
    }
}


/// Loads the daemon configuration for `name` into a default [`Configuration`].
///
/// With `search` set, `name` is a base name looked up in the home directory and
/// the system configuration directories. Otherwise it is a literal file path.
pub fn load_configuration<N>(
    name: N,
    search: bool,
) -> Result<LoadedConfiguration, ConfigurationLoadError>
where
    N: AsRef<OsStr>,
{
    ConfigurationLoader::new().load(name, search)
}

impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<P>(configuration_file_path: P) -> Result<LoadedConfiguration, ConfigurationLoadError>
    where
        P: AsRef<Path>,
    {
        load_configuration(configuration_file_path.as_ref(), false)
    }

    /// Search the default locations for the `siprelayd` configuration file and load it.
    pub fn load_from_default_paths() -> Result<LoadedConfiguration, ConfigurationLoadError> {
        load_configuration(DEFAULT_CONFIGURATION_NAME, true)
    }
}
