// core error kinds - each surfaces to the user as a one-line message

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RefactorError>;

#[derive(Debug, Error)]
pub enum RefactorError {
    /// malformed pair text: zero tokens, an odd token count or an empty token
    #[error("can't parse \"{input}\": {reason}")]
    Parse { input: String, reason: String },

    /// a source token failed to compile as a regular expression
    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// selection mode without a text surface to read from
    #[error("no active text surface: pipe a selection on stdin or pass --dir")]
    NoActiveSurface,

    /// selection mode with an empty selection
    #[error("selection is empty")]
    EmptySelection,

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// file content that cannot be decoded as utf-8
    #[error("{} is not valid utf-8", path.display())]
    NonUtf8Content { path: PathBuf },

    /// a path that cannot be represented as utf-8 for substitution
    #[error("path {} is not valid utf-8", path.display())]
    NonUtf8Path { path: PathBuf },

    /// i/o failures abort the current operation at the point of failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
