// src/lint/syntax_error.rs

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static LINE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"on line (\d+)\s*$").expect("valid line-number regex"));

static MESSAGE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:PHP )?(?:Parse|Fatal) error:\s*(?:syntax error, )?")
        .expect("valid message-prefix regex")
});


/// A diagnostic reported by the syntax checker for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    file: PathBuf,
    message: String,
}

impl SyntaxError {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The diagnostic exactly as the checker printed it.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Line number from a trailing `on line N`, if present.
    pub fn line(&self) -> Option<u32> {
        LINE_NUMBER
            .captures(&self.message)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// Message without the error-kind prefix and the trailing
    /// `in <file> on line N`, first letter upper-cased.
    ///
    /// `"Parse error: syntax error, unexpected end of file in a.php on line 3"`
    /// becomes `"Unexpected end of file"`. The location is only stripped when
    /// it names this error's file; otherwise the text is kept as is.
    pub fn normalized_message(&self) -> String {
        let message = MESSAGE_PREFIX.replace(&self.message, "");
        let message = strip_location(&message, &self.file).unwrap_or(&*message);

        let mut chars = message.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// `message` up to the ` in <dir/><file name> on line N` that ends it.
fn strip_location<'a>(message: &'a str, file: &Path) -> Option<&'a str> {
    let line_suffix = LINE_NUMBER.find(message)?;
    let before = message[..line_suffix.start()].trim_end();

    let name = file.file_name()?.to_str()?;
    let head = before.strip_suffix(name)?;

    let in_at = head.rfind(" in ")?;
    let dir = &head[in_at + " in ".len()..];
    if !dir.is_empty() && !dir.ends_with(['/', '\\']) {
        return None;
    }

    Some(head[..in_at].trim_end())
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}
