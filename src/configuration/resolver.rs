use std::{
    env,
    ffi::{OsStr, OsString},
    fs::File,
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::error::ConfigurationLoadError;


/// System-wide directories searched (in this order) after the user's
/// home directory, each holding a `{name}.conf` file.
const SYSTEM_CONFIGURATION_DIRECTORIES: [&str; 3] = ["/etc", "/usr/etc", "/usr/local/etc"];


/// Locates and opens the configuration file.
///
/// In search mode the candidates are, in order:
/// - `$HOME/.{name}rc`
/// - `/etc/{name}.conf`
/// - `/usr/etc/{name}.conf`
/// - `/usr/local/etc/{name}.conf`
///
/// Otherwise `name` is opened as a literal path. Names are used byte for byte,
/// they do not need to be valid UTF-8.
#[derive(Clone, Debug)]
pub struct PathResolver {
    home_directory: Option<PathBuf>,
}

impl PathResolver {
    /// Creates a resolver that takes the home directory from the `HOME`
    /// environment variable.
    pub fn from_environment() -> Self {
        Self {
            home_directory: env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// Creates a resolver with an explicit home directory (or none at all).
    pub fn with_home_directory<P>(home_directory: Option<P>) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            home_directory: home_directory.map(Into::into),
        }
    }

    /// Returns every path that [`Self::resolve`] would attempt, in attempt order.
    ///
    /// If the home directory is unknown, the per-user candidate cannot be formed
    /// and is left out; it could never be opened anyway.
    pub fn candidate_paths<N>(&self, name: N, search: bool) -> Vec<PathBuf>
    where
        N: AsRef<OsStr>,
    {
        let name = name.as_ref();

        if !search {
            return vec![PathBuf::from(name)];
        }

        let mut candidates = Vec::with_capacity(SYSTEM_CONFIGURATION_DIRECTORIES.len() + 1);

        if let Some(home_directory) = self.home_directory.as_ref() {
            candidates.push(home_directory.join(decorated_file_name(".", name, "rc")));
        }

        candidates.extend(
            SYSTEM_CONFIGURATION_DIRECTORIES
                .iter()
                .map(|directory| Path::new(directory).join(decorated_file_name("", name, ".conf"))),
        );

        candidates
    }

    /// Opens the first readable candidate for `name`.
    ///
    /// Fails with the OS-level reason of the last failed attempt if no candidate opens.
    pub fn resolve<N>(&self, name: N, search: bool) -> Result<(PathBuf, File), ConfigurationLoadError>
    where
        N: AsRef<OsStr>,
    {
        let name = name.as_ref();
        let candidates = self.candidate_paths(name, search);

        let mut attempted_paths = Vec::with_capacity(candidates.len());
        let mut last_error = io::Error::new(
            io::ErrorKind::NotFound,
            "home directory is unknown and no other candidate exists",
        );

        for candidate in candidates {
            debug!("Trying configuration file {}.", candidate.display());

            match File::open(&candidate) {
                Ok(file) => {
                    debug!("Opened configuration file {}.", candidate.display());
                    return Ok((candidate, file));
                }
                Err(error) => {
                    debug!(
                        "Could not open {}: {}.",
                        candidate.display(),
                        error
                    );

                    attempted_paths.push(candidate);
                    last_error = error;
                }
            }
        }

        Err(ConfigurationLoadError::from_open_failure(
            name,
            attempted_paths,
            last_error,
        ))
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::from_environment()
    }
}


fn decorated_file_name(prefix: &str, name: &OsStr, suffix: &str) -> OsString {
    let mut file_name = OsString::with_capacity(prefix.len() + name.len() + suffix.len());
    file_name.push(prefix);
    file_name.push(name);
    file_name.push(suffix);

    file_name
}
