//! Answer providers: the override layer and the interactive terminal.

use crate::error::{PromptError, Result};
use crate::question::Question;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use tracing::debug;

/// One layer in the answer resolution order.
///
/// `Ok(None)` means "this layer has nothing to say, ask the next one";
/// an error is final and never falls through to later layers.
pub trait ValueProvider {
    /// Produce a validated answer for `question`, or decline.
    fn provide(&self, question: &Question) -> Result<Option<String>>;
}

/// Non-interactive override layer, keyed by [`Question::id`].
///
/// An override that fails the question's validator is a hard error; the
/// question is never re-asked interactively in that case.
#[derive(Debug, Default)]
pub struct Overrides {
    values: HashMap<String, String>,
}

impl Overrides {
    /// Create an override layer from explicit key/value pairs.
    #[must_use]
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Add one override.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }
}

impl ValueProvider for Overrides {
    fn provide(&self, question: &Question) -> Result<Option<String>> {
        let Some(value) = self.values.get(question.id) else {
            return Ok(None);
        };
        question
            .check(value)
            .map_err(|reason| PromptError::Invalid {
                question: question.id,
                value: value.clone(),
                reason,
            })?;
        debug!("question '{}' answered by override", question.id);
        Ok(Some(value.clone()))
    }
}

/// Interactive terminal layer.
///
/// Parameterized over reader/writer so tests can script the exchange.
/// Empty input selects the question's default when one exists; invalid input
/// is re-prompted until the reader is exhausted.
pub struct Interactive<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    /// Create an interactive layer over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    fn ask(&self, question: &Question) -> std::io::Result<Option<String>> {
        let mut output = self.output.borrow_mut();
        let mut input = self.input.borrow_mut();

        if !question.help.is_empty() {
            writeln!(output, "{}", question.help)?;
        }
        if let Some(options) = &question.options {
            for option in options {
                writeln!(output, "  {option}")?;
            }
        }

        loop {
            match &question.default {
                Some(default) => write!(output, "{} [{}]: ", question.message, default)?,
                None => write!(output, "{}: ", question.message)?,
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // Reader exhausted with no acceptable answer.
                return Ok(None);
            }
            let answer = line.trim();

            let candidate = if answer.is_empty() {
                match &question.default {
                    Some(default) => default.clone(),
                    None => continue,
                }
            } else {
                answer.to_string()
            };

            match question.check(&candidate) {
                Ok(()) => return Ok(Some(candidate)),
                Err(reason) => writeln!(output, "invalid answer: {reason}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> ValueProvider for Interactive<R, W> {
    fn provide(&self, question: &Question) -> Result<Option<String>> {
        self.ask(question).map_err(|source| PromptError::Io {
            question: question.id,
            source,
        })
    }
}
