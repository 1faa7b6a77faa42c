//! Question specifications and validators.

use std::sync::Arc;

/// Validation function applied to every candidate answer.
pub type Validator = Arc<dyn Fn(&str) -> std::result::Result<(), String> + Send + Sync>;

/// Specification of one question: identifier, wording, constraints.
///
/// The identifier keys the override layer (one override entry per question);
/// the rest drives the interactive rendering and validation.
#[derive(Clone)]
pub struct Question {
    /// Stable identifier, e.g. `"aws-region"`.
    pub id: &'static str,
    /// Message shown to the user.
    pub message: &'static str,
    /// Longer help text, shown with the message.
    pub help: &'static str,
    /// Value accepted when the user submits empty input.
    pub default: Option<String>,
    /// Closed option set for select-style questions.
    pub options: Option<Vec<String>>,
    /// Validator applied to every candidate answer, from any layer.
    pub validator: Validator,
}

impl Question {
    /// Create a required free-form question.
    #[must_use]
    pub fn new(id: &'static str, message: &'static str) -> Self {
        Self {
            id,
            message,
            help: "",
            default: None,
            options: None,
            validator: validators::required(),
        }
    }

    /// Attach help text.
    #[must_use]
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Set the default accepted on empty input.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restrict answers to a closed option set; the options also become part
    /// of validation.
    #[must_use]
    pub fn options(mut self, options: Vec<String>) -> Self {
        self.validator = validators::all_of(vec![
            self.validator,
            validators::one_of(options.clone()),
        ]);
        self.options = Some(options);
        self
    }

    /// Replace the validator.
    #[must_use]
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Run the question's validator over a candidate answer.
    pub fn check(&self, value: &str) -> std::result::Result<(), String> {
        (self.validator)(value)
    }
}

impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Built-in validators, composable with [`validators::all_of`].
pub mod validators {
    use super::Validator;
    use std::sync::Arc;

    /// Reject empty and whitespace-only input.
    #[must_use]
    pub fn required() -> Validator {
        Arc::new(|value| {
            if value.trim().is_empty() {
                Err("a value is required".to_string())
            } else {
                Ok(())
            }
        })
    }

    /// Accept only members of the given option set.
    #[must_use]
    pub fn one_of(options: Vec<String>) -> Validator {
        Arc::new(move |value| {
            if options.iter().any(|option| option == value) {
                Ok(())
            } else {
                Err(format!("{value:?} is not one of the valid choices"))
            }
        })
    }

    /// Accept only absolute URIs with a scheme.
    #[must_use]
    pub fn has_scheme() -> Validator {
        Arc::new(|value| match url::Url::parse(value) {
            Ok(_) => Ok(()),
            Err(err) => Err(format!("invalid URI: {err}")),
        })
    }

    /// Run every validator in order, failing on the first rejection.
    #[must_use]
    pub fn all_of(validators: Vec<Validator>) -> Validator {
        Arc::new(move |value| {
            for validator in &validators {
                validator(value)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_extend_validation() {
        let q = Question::new("platform", "Platform")
            .options(vec!["aws".to_string(), "libvirt".to_string()]);

        assert!(q.check("aws").is_ok());
        assert!(q.check("azure").is_err());
        assert!(q.check("").is_err());
    }

    #[test]
    fn scheme_validator_accepts_qemu_uris() {
        let v = validators::has_scheme();
        assert!(v("qemu+tcp://192.168.122.1/system").is_ok());
        assert!(v("192.168.122.1/system").is_err());
    }
}
