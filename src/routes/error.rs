use std::fmt;
use std::io;
use std::path::PathBuf;

/// What was wrong with a routing directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigParseErrorKind {
    /// The line did not split into exactly three tokens
    TokenCount {
        /// Number of tokens found after whitespace normalization
        found: usize,
    },
    /// The first token was not `match`, `get` or `post`
    UnknownMethod(String),
    /// The third token was not of the form `controller#action`
    InvalidAction(String),
}

/// A malformed line in the routing configuration.
///
/// Parse errors are diagnostics: the offending line is skipped and
/// compilation carries on with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParseError {
    /// 1-based physical line number
    pub line: usize,
    /// The line as read, before whitespace normalization
    pub raw: String,
    pub kind: ConfigParseErrorKind,
}

impl fmt::Display for ConfigParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConfigParseErrorKind::TokenCount { found } => write!(
                f,
                "Invalid directive, '{}' (expected 3 tokens, found {found})  [line : {}]",
                self.raw.trim(),
                self.line
            ),
            ConfigParseErrorKind::UnknownMethod(token) => {
                write!(f, "Invalid directive, '{token}'  [line : {}]", self.line)
            }
            ConfigParseErrorKind::InvalidAction(token) => {
                write!(f, "Invalid action, '{token}'  [line : {}]", self.line)
            }
        }
    }
}

impl std::error::Error for ConfigParseError {}

/// The routing configuration could not be read at all.
#[derive(Debug)]
pub struct RoutesLoadError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for RoutesLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read file : {}", self.path.display())
    }
}

impl std::error::Error for RoutesLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
