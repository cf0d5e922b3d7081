// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::lint::SyntaxCheckOptions;
use crate::types::DEFAULT_READ_QUANTUM;

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [checker]
/// executable = "php"
/// asp_tags = false
/// short_open_tag = false
///
/// [batch]
/// helper_script = "bin/skip-linting.php"
/// read_quantum = 8192
/// ```
///
/// Both sections are optional; missing paths are rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLintConfig {
    #[serde(default)]
    pub checker: CheckerSection,

    #[serde(default)]
    pub batch: BatchSection,
}

/// `[checker]` section: how to invoke the syntax checker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckerSection {
    /// Path (or bare name resolved via `PATH`) of the checker executable.
    #[serde(default)]
    pub executable: PathBuf,

    #[serde(default)]
    pub asp_tags: bool,

    #[serde(default)]
    pub short_open_tag: bool,
}

impl CheckerSection {
    pub fn options(&self) -> SyntaxCheckOptions {
        SyntaxCheckOptions {
            asp_tags: self.asp_tags,
            short_open_tag: self.short_open_tag,
        }
    }
}

/// `[batch]` section: the skip-decision helper run by the checker.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSection {
    /// Script handed to the checker executable as its first argument.
    #[serde(default)]
    pub helper_script: PathBuf,

    /// Bytes requested by each incremental stdout read.
    #[serde(default = "default_read_quantum")]
    pub read_quantum: usize,
}

fn default_read_quantum() -> usize {
    DEFAULT_READ_QUANTUM
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            helper_script: PathBuf::new(),
            read_quantum: default_read_quantum(),
        }
    }
}

/// Validated configuration.
///
/// Produced by `TryFrom<RawLintConfig>` (see `validate.rs`): paths are
/// non-empty and the read quantum is within `1..=MAX_READ_QUANTUM`.
#[derive(Debug, Clone)]
pub struct LintConfig {
    pub checker: CheckerSection,
    pub batch: BatchSection,
}

impl LintConfig {
    pub(crate) fn new_unchecked(checker: CheckerSection, batch: BatchSection) -> Self {
        Self { checker, batch }
    }
}
