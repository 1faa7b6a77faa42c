//! Error types for answer resolution.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for prompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors raised while resolving an answer to a question.
#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    /// A supplied value failed the question's validator.
    ///
    /// An invalid override is a hard failure; resolution never falls back to
    /// interactive prompting for it.
    #[error("invalid value {value:?} for '{question}': {reason}")]
    #[diagnostic(code(clusterforge_prompt::invalid))]
    Invalid {
        /// Identifier of the question being answered.
        question: &'static str,
        /// The rejected value.
        value: String,
        /// Why the validator rejected it.
        reason: String,
    },

    /// No provider in the layer list produced an answer.
    #[error("no answer available for '{question}'")]
    #[diagnostic(code(clusterforge_prompt::unanswered))]
    Unanswered {
        /// Identifier of the unanswered question.
        question: &'static str,
    },

    /// Reading from or writing to the interactive terminal failed.
    #[error("interactive prompt I/O failed for '{question}'")]
    #[diagnostic(code(clusterforge_prompt::io))]
    Io {
        /// Identifier of the question being asked.
        question: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
