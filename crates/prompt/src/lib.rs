//! Layered answer resolution for clusterforge interactive questions.
//!
//! Assets that need user input describe it as a [`Question`] (message,
//! options, default, validator) and resolve it through [`Answers`], an
//! explicit ordered list of [`ValueProvider`] layers: the override map first,
//! the interactive terminal last. An override that fails validation is a hard
//! error rather than a fallback to prompting, so non-interactive runs stay
//! non-interactive.

mod answers;
mod error;
mod providers;
mod question;

pub use answers::Answers;
pub use error::{PromptError, Result};
pub use providers::{Interactive, Overrides, ValueProvider};
pub use question::{Question, Validator, validators};
