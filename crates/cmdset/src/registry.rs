//! Ordered registry of command descriptors.

use std::collections::HashSet;

use tracing::debug;

use crate::descriptor::{CommandSpec, normalize};
use crate::dispatcher::DISPATCH_TARGET;
use crate::error::SetupError;

/// Commands known to a dispatcher, in registration order.
///
/// Commands are added in groups. Groups only affect help layout: the first
/// command of each group is preceded by a blank line.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group of commands.
    ///
    /// The group is added atomically: when any name collides with a
    /// registered command, or with another command of the same group, nothing
    /// is added.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::DuplicateCommand`] naming the first collision.
    pub fn add_group<I>(&mut self, group: I) -> Result<(), SetupError>
    where
        I: IntoIterator<Item = CommandSpec>,
    {
        let mut group: Vec<CommandSpec> = group.into_iter().collect();
        let mut seen: HashSet<&str> = self
            .commands
            .iter()
            .map(CommandSpec::normalized_name)
            .collect();
        for spec in &group {
            if !seen.insert(spec.normalized_name()) {
                return Err(SetupError::DuplicateCommand {
                    name: spec.normalized_name().to_owned(),
                });
            }
        }

        if let Some(first) = group.first_mut() {
            first.mark_first_of_group();
        }
        debug!(
            target: DISPATCH_TARGET,
            commands = ?group.iter().map(CommandSpec::name).collect::<Vec<_>>(),
            "registered command group"
        );
        self.commands.append(&mut group);
        Ok(())
    }

    /// Finds a command by name, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        let wanted = normalize(name);
        self.commands
            .iter()
            .find(|spec| spec.normalized_name() == wanted)
    }

    /// Iterates over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandRegistry {
    type Item = &'a CommandSpec;
    type IntoIter = std::slice::Iter<'a, CommandSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
