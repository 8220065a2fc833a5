use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while resolving or laying out a badge ring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// On-chain filter value outside all/onchain/offchain
    #[error("Unknown on-chain filter: {0} (expected all, onchain or offchain)")]
    UnknownOnchainMode(String),

    /// Corpora not loaded, or their load failed
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// Asset not present in the asset corpus
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Unparseable attestation or expiry date
    #[error("Malformed {field} {value:?}")]
    MalformedDate { field: &'static str, value: String },

    /// No slot at the requested index in the current pass
    #[error("No slot at index {index} ({count} slots resolved)")]
    SlotOutOfRange { index: usize, count: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create a malformed-date error
    pub fn malformed_date(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedDate {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a corpus-unavailable error
    pub fn corpus_unavailable(msg: impl Into<String>) -> Self {
        Self::CorpusUnavailable(msg.into())
    }
}
