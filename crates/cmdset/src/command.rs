//! The per-invocation command handler contract.
//!
//! A [`Command`] is created fresh for every invocation by its
//! [`CommandSpec`]. The dispatcher drives it through a fixed pipeline:
//!
//! 1. [`Command::add_options`] appends option declarations.
//! 2. The tokenizer splits the remaining arguments.
//! 3. [`Command::help`] replaces the rest of the pipeline when `--help` is set.
//! 4. [`Command::parse_args`] validates options and consumes positionals.
//! 5. [`Command::do_command`] performs the action.
//!
//! Validation may only fail with a [`UsageError`]; anything else going wrong
//! while validating is a defect in the handler and should panic. Execution
//! reports every failure through its returned [`CommandError`].

use crate::args::Arguments;
use crate::dispatcher::DefaultCommand;
use crate::descriptor::CommandSpec;
use crate::error::{CommandError, UsageError};
use crate::options::OptionConfig;
use crate::registry::CommandRegistry;

/// Lifecycle hooks of a named command.
///
/// Only [`Command::do_command`] is required.
///
/// Handlers sharing options compose them explicitly rather than inheriting
/// them:
///
/// ```rust,ignore
/// fn add_options(&self, options: &mut OptionConfig) {
///     add_verbosity(options);
///     options.boolean("force").alias("force", "f");
/// }
/// ```
pub trait Command {
    /// Declares the options this command accepts.
    ///
    /// Implementations must only append to `options`.
    fn add_options(&self, options: &mut OptionConfig) {
        let _ = options;
    }

    /// Validates option values and consumes the positionals the command
    /// understands.
    ///
    /// Positionals left in `args` once this returns are rejected by the
    /// dispatcher with [`UsageError::UnexpectedArgument`], so handlers do not
    /// need to check for extras themselves.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] for any malformed input.
    fn parse_args(
        &mut self,
        context: &CommandContext<'_>,
        args: &mut Arguments,
    ) -> Result<(), UsageError> {
        let _ = (context, args);
        Ok(())
    }

    /// Performs the command.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] when the command cannot complete.
    fn do_command(
        &mut self,
        context: &CommandContext<'_>,
        args: Arguments,
    ) -> Result<(), CommandError>;

    /// Help text for this command alone, before wrapping.
    ///
    /// Defaults to the dispatcher's one-line summary entry.
    fn help(&self, context: &CommandContext<'_>, width: usize) -> String {
        context.summary_help(width)
    }
}

/// What a running command can see of its dispatcher.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    spec: &'a CommandSpec,
    registry: &'a CommandRegistry,
    layout: &'a dyn DefaultCommand,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        spec: &'a CommandSpec,
        registry: &'a CommandRegistry,
        layout: &'a dyn DefaultCommand,
    ) -> Self {
        Self {
            spec,
            registry,
            layout,
        }
    }

    /// The name the command was registered under.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.spec.name()
    }

    /// The descriptor that created this command.
    #[must_use]
    pub const fn spec(&self) -> &'a CommandSpec {
        self.spec
    }

    /// Every command registered with the dispatcher.
    #[must_use]
    pub const fn registry(&self) -> &'a CommandRegistry {
        self.registry
    }

    /// Renders this command's entry the way the aggregate help does.
    #[must_use]
    pub fn summary_help(&self, width: usize) -> String {
        self.layout.help_entry(self.spec, width)
    }
}
