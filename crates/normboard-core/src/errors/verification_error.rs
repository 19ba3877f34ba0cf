/// Fatal conditions of a verification pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// A `fail(...)` norm fired: the current state is forbidden.
    #[error("norm {norm_id} regimented the current state: {reason}")]
    Regimented { norm_id: String, reason: String },

    /// A norm produced a consequence that cannot be turned into an obligation.
    #[error("malformed norm {norm_id}: {reason}")]
    MalformedNorm { norm_id: String, reason: String },

    /// A norm condition produced more solutions than the configured bound.
    #[error("norm {norm_id} exceeded {limit} condition solutions")]
    SolutionLimitExceeded { norm_id: String, limit: usize },
}

impl VerificationError {
    /// Id of the norm that caused the failure.
    pub fn norm_id(&self) -> &str {
        match self {
            Self::Regimented { norm_id, .. }
            | Self::MalformedNorm { norm_id, .. }
            | Self::SolutionLimitExceeded { norm_id, .. } => norm_id,
        }
    }
}
