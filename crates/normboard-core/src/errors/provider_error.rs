/// Errors a dynamic fact provider may report from `consult`.
///
/// These never abort a verification pass; the registry degrades the
/// provider to "not relevant" for the literal being resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("consultation of {literal} failed: {reason}")]
    ConsultFailed { literal: String, reason: String },

    #[error("provider bound {literal} cyclically: {binding}")]
    CyclicBinding { literal: String, binding: String },
}
