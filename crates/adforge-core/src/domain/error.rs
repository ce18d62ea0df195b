//! Domain-level error taxonomy for adforge.

/// Errors produced while checking configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("match type weights must sum to 100, got {total}")]
    WeightsNotNormalized { total: u32 },

    #[error("geo preset must be between 0 and 100, got {value}")]
    PresetOutOfRange { value: u32 },
}

/// adforge domain errors.
#[derive(Debug, thiserror::Error)]
pub enum AdforgeError {
    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    #[error("unknown structure type: {0}")]
    UnknownStrategy(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for adforge domain operations.
pub type Result<T> = std::result::Result<T, AdforgeError>;
