// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{LintConfig, RawLintConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawLintConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawLintConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawLintConfig = toml::from_str(&contents)?;
    debug!(path = ?path, "loaded lint config");

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that the checker executable and helper script are set and that
///   the read quantum is positive.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<LintConfig> {
    let raw_config = load_from_path(&path)?;
    let config = LintConfig::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `Parlint.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Parlint.toml")
}
