/// Errors raised while turning text into literals or normative programs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text is not a ground logical atom.
    #[error("malformed fact `{text}`: {reason}")]
    MalformedFact { text: String, reason: String },

    /// The norm source is syntactically invalid.
    #[error("norm parse error at {line}:{column}: {message}")]
    NormParse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    pub fn malformed_fact(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedFact {
            text: text.into(),
            reason: reason.into(),
        }
    }
}
