// src/config/validate.rs

use crate::config::model::{LintConfig, RawLintConfig};
use crate::errors::{ParlintError, Result};
use crate::types::MAX_READ_QUANTUM;

impl TryFrom<RawLintConfig> for LintConfig {
    type Error = ParlintError;

    fn try_from(raw: RawLintConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(LintConfig::new_unchecked(raw.checker, raw.batch))
    }
}

fn validate_raw_config(cfg: &RawLintConfig) -> Result<()> {
    validate_checker(cfg)?;
    validate_batch(cfg)?;
    Ok(())
}

fn validate_checker(cfg: &RawLintConfig) -> Result<()> {
    if cfg.checker.executable.as_os_str().is_empty() {
        return Err(ParlintError::ConfigError(
            "[checker].executable must be set to a non-empty path".to_string(),
        ));
    }
    Ok(())
}

fn validate_batch(cfg: &RawLintConfig) -> Result<()> {
    if cfg.batch.helper_script.as_os_str().is_empty() {
        return Err(ParlintError::ConfigError(
            "[batch].helper_script must be set to a non-empty path".to_string(),
        ));
    }

    if cfg.batch.read_quantum == 0 {
        return Err(ParlintError::ConfigError(
            "[batch].read_quantum must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.batch.read_quantum > MAX_READ_QUANTUM {
        return Err(ParlintError::ConfigError(format!(
            "[batch].read_quantum must be <= {MAX_READ_QUANTUM} (got {})",
            cfg.batch.read_quantum
        )));
    }

    Ok(())
}
