use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the application database.
const DATABASE_FILENAME: &str = "fuelcalc.db";

/// Environment variable that overrides the database location.
pub const DATABASE_ENV_VAR: &str = "FUELCALC_DB";

/// Resolve the default database location using platform-specific project directories.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "fuelcalc", "fuelcalc").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATABASE_FILENAME))
}

/// Resolve the database path: explicit argument, then `FUELCALC_DB`, then the
/// platform data directory. A directory argument gets the default filename
/// appended.
pub fn resolve_database_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match env::var_os(DATABASE_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_database_path()?,
        },
    };

    let path = if path.is_dir() {
        path.join(DATABASE_FILENAME)
    } else {
        path
    };
    debug!(path = %path.display(), "resolved database path");
    Ok(path)
}
