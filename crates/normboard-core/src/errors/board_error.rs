use super::{ParseError, VerificationError};

/// Top-level error returned by every public board operation.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("verification failure: {0}")]
    Verification(#[from] VerificationError),

    #[error("board {board_id} is not initialized")]
    NotInitialized { board_id: String },

    #[error("concurrency error: {0}")]
    Concurrency(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// True for `MalformedFact` parse errors.
    pub fn is_malformed_fact(&self) -> bool {
        matches!(self, Self::Parse(ParseError::MalformedFact { .. }))
    }

    /// True for `NormParse` errors.
    pub fn is_norm_parse(&self) -> bool {
        matches!(self, Self::Parse(ParseError::NormParse { .. }))
    }

    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized { .. })
    }

    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::Verification(_))
    }
}

impl From<toml::de::Error> for BoardError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convenience alias.
pub type BoardResult<T> = Result<T, BoardError>;
