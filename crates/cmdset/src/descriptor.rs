//! Static descriptors for registered commands.

use std::fmt;

use crate::command::Command;
use crate::error::SetupError;

type CommandFactory = Box<dyn Fn() -> Box<dyn Command>>;

/// Describes one named command and builds a fresh handler per invocation.
///
/// The name is the first whitespace-delimited token of the syntax string.
/// Lookups use the lower-cased name, so `Build`, `BUILD` and `build` select
/// the same command.
pub struct CommandSpec {
    name: String,
    normalized_name: String,
    syntax: String,
    summary: String,
    first_of_group: bool,
    factory: CommandFactory,
}

impl CommandSpec {
    /// Creates a descriptor from its display syntax, one-line summary, and
    /// handler factory.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingName`] when `syntax` is blank and
    /// [`SetupError::DashedName`] when the name starts with `-`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let spec = CommandSpec::new("build [target]", "Builds a target.", Build::default)?;
    /// assert_eq!(spec.name(), "build");
    /// ```
    pub fn new<F, C>(
        syntax: impl Into<String>,
        summary: impl Into<String>,
        factory: F,
    ) -> Result<Self, SetupError>
    where
        F: Fn() -> C + 'static,
        C: Command + 'static,
    {
        let syntax = syntax.into();
        let name = syntax
            .split_whitespace()
            .next()
            .ok_or_else(|| SetupError::MissingName {
                syntax: syntax.clone(),
            })?
            .to_owned();
        if name.starts_with('-') {
            return Err(SetupError::DashedName { name });
        }

        Ok(Self {
            normalized_name: normalize(&name),
            name,
            syntax,
            summary: summary.into(),
            first_of_group: false,
            factory: Box::new(move || -> Box<dyn Command> { Box::new(factory()) }),
        })
    }

    /// The command name as written in the syntax string.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lower-cased name used for lookups.
    #[must_use]
    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    /// The full display syntax.
    #[must_use]
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// The one-line summary shown in help.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns `true` when this command opens a help group.
    #[must_use]
    pub const fn is_first_of_group(&self) -> bool {
        self.first_of_group
    }

    pub(crate) const fn mark_first_of_group(&mut self) {
        self.first_of_group = true;
    }

    /// Builds a fresh handler for one invocation.
    #[must_use]
    pub fn create_command(&self) -> Box<dyn Command> {
        (self.factory)()
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("syntax", &self.syntax)
            .field("summary", &self.summary)
            .field("first_of_group", &self.first_of_group)
            .finish_non_exhaustive()
    }
}

/// Case-folds a command name for lookup.
pub(crate) fn normalize(name: &str) -> String {
    name.to_lowercase()
}
