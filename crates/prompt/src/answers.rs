//! Ordered layering of answer providers.

use crate::error::{PromptError, Result};
use crate::providers::ValueProvider;
use crate::question::Question;
use tracing::debug;

/// An ordered list of answer providers, consulted first to last.
///
/// The conventional layering is the explicit override map first and the
/// interactive terminal last; the first provider that produces a value wins.
/// Provider errors (an invalid override, broken terminal I/O) are final and
/// never fall through to later layers. When every layer declines, a question
/// that carries a default resolves to it, so defaulted questions never need
/// an override or a terminal.
pub struct Answers {
    providers: Vec<Box<dyn ValueProvider>>,
}

impl Answers {
    /// Build the layer list in consultation order.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn ValueProvider>>) -> Self {
        Self { providers }
    }

    /// Resolve one question through the layers, falling back to the
    /// question's default when every layer declines.
    ///
    /// # Errors
    ///
    /// [`PromptError::Unanswered`] when every layer declines and the question
    /// has no default, or the first provider error.
    pub fn resolve(&self, question: &Question) -> Result<String> {
        for provider in &self.providers {
            if let Some(answer) = provider.provide(question)? {
                return Ok(answer);
            }
        }
        if let Some(default) = &question.default {
            question
                .check(default)
                .map_err(|reason| PromptError::Invalid {
                    question: question.id,
                    value: default.clone(),
                    reason,
                })?;
            debug!("question '{}' answered by its default", question.id);
            return Ok(default.clone());
        }
        Err(PromptError::Unanswered {
            question: question.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Interactive, Overrides};

    fn platform_question() -> Question {
        Question::new("platform", "Platform")
            .options(vec!["aws".to_string(), "libvirt".to_string()])
    }

    #[test]
    fn override_layer_wins_over_interactive() {
        let mut overrides = Overrides::default();
        overrides.set("platform", "aws");
        // The interactive layer would answer "libvirt" if consulted.
        let answers = Answers::new(vec![
            Box::new(overrides),
            Box::new(Interactive::new(&b"libvirt\n"[..], Vec::new())),
        ]);

        assert_eq!(answers.resolve(&platform_question()).unwrap(), "aws");
    }

    #[test]
    fn falls_through_to_interactive_when_no_override() {
        let answers = Answers::new(vec![
            Box::new(Overrides::default()),
            Box::new(Interactive::new(&b"libvirt\n"[..], Vec::new())),
        ]);

        assert_eq!(answers.resolve(&platform_question()).unwrap(), "libvirt");
    }

    #[test]
    fn invalid_override_never_falls_back() {
        let mut overrides = Overrides::default();
        overrides.set("platform", "azure");
        let answers = Answers::new(vec![
            Box::new(overrides),
            Box::new(Interactive::new(&b"aws\n"[..], Vec::new())),
        ]);

        let err = answers.resolve(&platform_question()).unwrap_err();
        assert!(matches!(err, PromptError::Invalid { .. }));
    }

    #[test]
    fn declined_layers_fall_back_to_the_default() {
        let question = Question::new("aws-user-tags", "User Tags").default_value("{}");
        // No providers at all: the default still answers.
        let answers = Answers::new(vec![]);
        assert_eq!(answers.resolve(&question).unwrap(), "{}");

        // An empty override layer declines without consuming the default.
        let answers = Answers::new(vec![Box::new(Overrides::default())]);
        assert_eq!(answers.resolve(&question).unwrap(), "{}");
    }

    #[test]
    fn override_wins_over_the_default() {
        let question = Question::new("aws-region", "Region").default_value("us-east-1");
        let mut overrides = Overrides::default();
        overrides.set("aws-region", "eu-west-1");
        let answers = Answers::new(vec![Box::new(overrides)]);

        assert_eq!(answers.resolve(&question).unwrap(), "eu-west-1");
    }

    #[test]
    fn exhausted_layers_report_unanswered_without_a_default() {
        let answers = Answers::new(vec![Box::new(Overrides::default())]);
        let err = answers.resolve(&platform_question()).unwrap_err();
        assert!(matches!(err, PromptError::Unanswered { question: "platform" }));
    }
}
