//! Structured arguments handed to validation and execution hooks.

use std::collections::{BTreeMap, VecDeque};
use std::str::FromStr;

use crate::error::UsageError;
use crate::options::OptionValue;

/// Options and positionals for one invocation.
///
/// Validation hooks consume positionals from the front. Whatever remains
/// once validation returns is rejected by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    options: BTreeMap<String, OptionValue>,
    positionals: VecDeque<String>,
}

impl Arguments {
    /// Builds arguments from parsed options and literal positionals.
    #[must_use]
    pub fn new<I>(options: BTreeMap<String, OptionValue>, positionals: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            options,
            positionals: positionals.into_iter().collect(),
        }
    }

    /// Looks up the value of an option.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Returns `true` when a switch is set.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_truthy)
    }

    /// Returns the text of a single-valued option.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_text)
    }

    /// Parses the text of a single-valued option.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::Invalid`] when the option is present but does
    /// not parse as `T`.
    pub fn parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, UsageError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => {
                let text = value.to_string();
                text.parse()
                    .map(Some)
                    .map_err(|_| UsageError::invalid(format!("invalid value '{text}' for --{name}")))
            }
        }
    }

    /// Iterates over every option and its value.
    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Positionals not yet consumed.
    #[must_use]
    pub fn positionals(&self) -> &VecDeque<String> {
        &self.positionals
    }

    /// Returns `true` while unconsumed positionals remain.
    #[must_use]
    pub fn has_positionals(&self) -> bool {
        !self.positionals.is_empty()
    }

    /// Returns the next positional without consuming it.
    #[must_use]
    pub fn peek_positional(&self) -> Option<&str> {
        self.positionals.front().map(String::as_str)
    }

    /// Removes and returns the next positional.
    pub fn take_positional(&mut self) -> Option<String> {
        self.positionals.pop_front()
    }

    /// Removes and returns the next positional, which must be present.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::Invalid`] naming `what` when no positional is
    /// left.
    pub fn require_positional(&mut self, what: &str) -> Result<String, UsageError> {
        self.take_positional()
            .ok_or_else(|| UsageError::invalid(format!("missing {what} argument")))
    }

    /// Removes the next positional and parses it as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::Invalid`] naming `what` and the literal when the
    /// positional does not parse. The positional is consumed either way.
    pub fn take_parsed<T: FromStr>(&mut self, what: &str) -> Result<Option<T>, UsageError> {
        let Some(literal) = self.take_positional() else {
            return Ok(None);
        };
        literal
            .parse()
            .map(Some)
            .map_err(|_| UsageError::invalid(format!("invalid {what} '{literal}'")))
    }

    /// Removes and returns every remaining positional.
    pub fn take_remaining(&mut self) -> Vec<String> {
        self.positionals.drain(..).collect()
    }
}
