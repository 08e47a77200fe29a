use thiserror::Error;

use crate::catalog::Language;

/// Problems with the embedded or user supplied text library.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no texts available for language {0}")]
    NoTexts(Language),

    #[error("text {0:?} has no lines")]
    EmptyText(String),

    #[error("text {name:?} has an empty line at index {index}")]
    EmptyLine { name: String, index: usize },

    #[error("text {0:?} has a zero default duration")]
    ZeroDuration(String),

    #[error("catalog file {file} is malformed: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog file {0} is not valid utf-8")]
    Encoding(String),
}

/// Errors surfaced by the session state machine.
///
/// Ordinary typing mistakes never show up here; they are reported through
/// [`crate::trainer::Keystroke`] instead.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// The selected text or session settings cannot start a session.
    #[error("configuration error: {0}")]
    Configuration(#[from] CatalogError),

    #[error("session duration must be greater than zero")]
    ZeroDuration,

    /// Settings other than the language are locked while a session runs.
    #[error("cannot change settings while a session is running")]
    SessionRunning,
}

pub type Result<T, E = TrainerError> = std::result::Result<T, E>;
