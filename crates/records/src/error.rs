use thiserror::Error;

/// Result type for record ingestion and corpus loading
pub type Result<T> = std::result::Result<T, RecordsError>;

/// Errors raised at the ingestion boundary
#[derive(Error, Debug)]
pub enum RecordsError {
    /// A corpus could not be read or parsed; nothing may be rendered from it
    #[error("Corpus unavailable ({corpus}): {reason}")]
    CorpusUnavailable { corpus: String, reason: String },

    /// A single corpus element was rejected
    #[error("Invalid record in {corpus} at position {position}: {reason}")]
    InvalidRecord {
        corpus: String,
        position: usize,
        reason: String,
    },
}

impl RecordsError {
    /// Create a corpus-unavailable error
    pub fn corpus_unavailable(corpus: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorpusUnavailable {
            corpus: corpus.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-record error
    pub fn invalid_record(
        corpus: impl Into<String>,
        position: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            corpus: corpus.into(),
            position,
            reason: reason.into(),
        }
    }
}
