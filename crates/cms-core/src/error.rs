//! Error types for cms-core

use std::path::PathBuf;

use cms_dom::DomError;

#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Content source error: {0}")]
    Source(#[from] SourceError),

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, CmsError>;

/// Why a content file could not be fetched.
///
/// The loader never propagates these; a failed fetch only means the
/// section keeps its existing markup.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out fetching {name} after {millis} ms")]
    Timeout { name: String, millis: u64 },

    #[error("Content of {name} is not valid UTF-8")]
    Utf8 { name: String },
}
