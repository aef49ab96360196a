//! Expansion of path values from `sitenav.toml` and the command line.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Expand environment variables and a leading `~` in a path value.
///
/// `${VAR}` must be set, `${VAR:-default}` falls back to `default`. A bare
/// `$NAME` is left alone so paths containing a literal `$` survive. `~` and
/// `~/...` become the home directory.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<PathBuf, ConfigError> {
    let with_vars = if value.contains("${") {
        shellexpand::env_with_context(value, |var| lookup(var, field))?
    } else {
        value.into()
    };
    Ok(PathBuf::from(shellexpand::tilde(&with_vars).as_ref()))
}

/// Expand a path given as a `PathBuf`, keeping non-UTF-8 paths unchanged.
pub(crate) fn expand_path_buf(path: &Path, field: &str) -> Result<PathBuf, ConfigError> {
    match path.to_str() {
        Some(value) => expand_path(value, field),
        None => Ok(path.to_path_buf()),
    }
}

fn lookup(var: &str, field: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        }),
    }
}

impl From<shellexpand::LookupError<ConfigError>> for ConfigError {
    fn from(err: shellexpand::LookupError<ConfigError>) -> Self {
        err.cause
    }
}
