use std::{ffi::OsStr, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;


/// Fatal configuration loading errors.
///
/// These are only raised when no configuration file could be opened at all.
/// Problems inside an opened file are reported as
/// [`ConfigurationDiagnostic`][super::ConfigurationDiagnostic]s instead.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigurationLoadError {
    #[error("could not open configuration file \"{name}\": {source}")]
    #[diagnostic(
        code(siprelayd::configuration::file_not_found),
        help("pass an existing file, or create one of the searched locations")
    )]
    FileNotFound {
        name: String,
        attempted_paths: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file \"{name}\" is not readable: {source}")]
    #[diagnostic(
        code(siprelayd::configuration::unreadable),
        help("check the permissions of the configuration file")
    )]
    Unreadable {
        name: String,
        attempted_paths: Vec<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigurationLoadError {
    pub(crate) fn from_open_failure(
        name: &OsStr,
        attempted_paths: Vec<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        // Only used for display; the paths keep the exact bytes.
        let name = name.to_string_lossy().into_owned();

        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound {
                name,
                attempted_paths,
                source,
            },
            _ => Self::Unreadable {
                name,
                attempted_paths,
                source,
            },
        }
    }

    /// Every path that was attempted before giving up, in attempt order.
    pub fn attempted_paths(&self) -> &[PathBuf] {
        match self {
            Self::FileNotFound {
                attempted_paths, ..
            } => attempted_paths,
            Self::Unreadable {
                attempted_paths, ..
            } => attempted_paths,
        }
    }
}
