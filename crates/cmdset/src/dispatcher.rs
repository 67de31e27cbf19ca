//! Command selection and the dispatch pipeline.
//!
//! [`Dispatcher::run`] inspects the first argument. When it does not start
//! with a dash it names a command, looked up case-insensitively; the command's
//! handler then drives the pipeline with the remaining arguments. Otherwise
//! the [`DefaultCommand`] drives it with the full argument list.
//!
//! Either way the pipeline is the same: declare options, tokenize, answer
//! `--help` and stop, validate, reject leftover positionals, execute.

use std::fmt;
use std::io::Write;

use tracing::{debug, trace};

use crate::args::Arguments;
use crate::command::CommandContext;
use crate::descriptor::CommandSpec;
use crate::error::{CommandError, SetupError, UsageError};
use crate::options::{HELP_OPTION, OptionConfig};
use crate::registry::CommandRegistry;
use crate::tokenizer::{FlagTokenizer, OptionParser};
use crate::wrap::wrap;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Column at which help output wraps unless configured otherwise.
pub const DEFAULT_HELP_WIDTH: usize = 80;

/// Hooks run when no command is named, plus the aggregate help layout.
///
/// Every method has a default, so `impl DefaultCommand for MyApp {}` is a
/// complete implementation.
pub trait DefaultCommand {
    /// Declares the options accepted when no command is named.
    fn add_options(&self, options: &mut OptionConfig) {
        let _ = options;
    }

    /// Validates arguments on the default path.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] for any malformed input.
    fn parse_args(
        &mut self,
        registry: &CommandRegistry,
        args: &mut Arguments,
    ) -> Result<(), UsageError> {
        let _ = (registry, args);
        Ok(())
    }

    /// Runs when no command is named.
    ///
    /// # Errors
    ///
    /// By default fails with [`UsageError::MissingCommand`] when commands are
    /// registered, since the operator must have forgotten to name one, and
    /// with [`CommandError::NotImplemented`] otherwise.
    fn do_command(
        &mut self,
        registry: &CommandRegistry,
        args: Arguments,
    ) -> Result<(), CommandError> {
        let _ = args;
        if registry.is_empty() {
            Err(CommandError::NotImplemented)
        } else {
            Err(UsageError::MissingCommand.into())
        }
    }

    /// Opening paragraph of the aggregate help.
    fn help_intro(&self, width: usize) -> String {
        let _ = width;
        String::from("Commands:\n")
    }

    /// One command's entry: its syntax, then its summary indented below.
    fn help_entry(&self, spec: &CommandSpec, width: usize) -> String {
        let _ = width;
        format!("  {}\n      {}\n", spec.syntax(), spec.summary())
    }

    /// Closing text of the aggregate help.
    fn help_trailer(&self, width: usize) -> String {
        let _ = width;
        String::from("\n")
    }
}

/// Default-path behaviour of a dispatcher built with [`Dispatcher::new`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDefaultCommand;

impl DefaultCommand for NoDefaultCommand {}

/// Owns the command registry and runs invocations against it.
pub struct Dispatcher<D = NoDefaultCommand> {
    registry: CommandRegistry,
    default_command: D,
    help_width: usize,
    parser: Box<dyn OptionParser>,
}

impl Dispatcher<NoDefaultCommand> {
    /// Creates a dispatcher whose default path only reports a missing
    /// command.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_command(NoDefaultCommand)
    }
}

impl Default for Dispatcher<NoDefaultCommand> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: fmt::Debug> fmt::Debug for Dispatcher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("default_command", &self.default_command)
            .field("help_width", &self.help_width)
            .finish_non_exhaustive()
    }
}

impl<D: DefaultCommand> Dispatcher<D> {
    /// Creates a dispatcher that runs `default_command` when no command is
    /// named.
    pub fn with_default_command(default_command: D) -> Self {
        Self {
            registry: CommandRegistry::new(),
            default_command,
            help_width: DEFAULT_HELP_WIDTH,
            parser: Box::new(FlagTokenizer),
        }
    }

    /// Sets the column at which help output wraps.
    #[must_use]
    pub fn with_help_width(mut self, width: usize) -> Self {
        self.help_width = width;
        self
    }

    /// Replaces the option tokenizer.
    #[must_use]
    pub fn with_option_parser(mut self, parser: impl OptionParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Registers a group of commands.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::DuplicateCommand`] when a name is already taken.
    /// This is a programming error and should abort start-up.
    pub fn add_commands<I>(&mut self, group: I) -> Result<&mut Self, SetupError>
    where
        I: IntoIterator<Item = CommandSpec>,
    {
        self.registry.add_group(group)?;
        Ok(self)
    }

    /// The registered commands.
    #[must_use]
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The default-path handler.
    #[must_use]
    pub const fn default_command(&self) -> &D {
        &self.default_command
    }

    /// The configured help width.
    #[must_use]
    pub const fn help_width(&self) -> usize {
        self.help_width
    }

    /// Builds the aggregate help listing every registered command.
    #[must_use]
    pub fn help(&self, width: usize) -> String {
        render_help(&self.default_command, &self.registry, width)
    }

    /// Runs one invocation.
    ///
    /// Help output goes to `stdout`. The returned result is the invocation's
    /// completion: `Ok(())` on success, including after printing help.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] whose kind tells the caller how to report
    /// it; see [`CommandError::is_usage`].
    pub fn run<I, S, W>(&mut self, argv: I, stdout: &mut W) -> Result<(), CommandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: Write,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        match argv.split_first() {
            Some((name, rest)) if !name.starts_with('-') => self.run_named(name, rest, stdout),
            _ => self.run_default(&argv, stdout),
        }
    }

    fn run_named<W: Write>(
        &self,
        name: &str,
        rest: &[String],
        stdout: &mut W,
    ) -> Result<(), CommandError> {
        let spec = self
            .registry
            .find(name)
            .ok_or_else(|| UsageError::UnknownCommand {
                name: name.to_owned(),
            })?;
        debug!(target: DISPATCH_TARGET, command = spec.name(), "selected command");

        let mut command = spec.create_command();
        let context = CommandContext::new(spec, &self.registry, &self.default_command);

        let mut options = OptionConfig::with_help();
        command.add_options(&mut options);
        let mut args = self.tokenize(rest, &options);

        if args.flag(HELP_OPTION) {
            let help = command.help(&context, self.help_width);
            return self.write_help(&help, stdout);
        }

        command.parse_args(&context, &mut args)?;
        reject_leftovers(&args)?;
        command.do_command(&context, args)
    }

    fn run_default<W: Write>(&mut self, argv: &[String], stdout: &mut W) -> Result<(), CommandError> {
        debug!(target: DISPATCH_TARGET, "no command named, using default path");

        let mut options = OptionConfig::with_help();
        self.default_command.add_options(&mut options);
        let mut args = self.tokenize(argv, &options);

        if args.flag(HELP_OPTION) {
            let help = self.help(self.help_width);
            return self.write_help(&help, stdout);
        }

        self.default_command.parse_args(&self.registry, &mut args)?;
        reject_leftovers(&args)?;
        self.default_command.do_command(&self.registry, args)
    }

    fn tokenize(&self, argv: &[String], options: &OptionConfig) -> Arguments {
        trace!(target: DISPATCH_TARGET, ?options, "composed option configuration");
        let parsed = self.parser.parse(argv, options);
        // Positionals reach handlers as their literal text, whatever the
        // tokenizer inferred.
        let positionals = parsed.positionals.into_iter().map(|value| value.into_text());
        Arguments::new(parsed.options, positionals)
    }

    fn write_help<W: Write>(&self, help: &str, stdout: &mut W) -> Result<(), CommandError> {
        debug!(target: DISPATCH_TARGET, "help requested");
        let wrapped = wrap(help, self.help_width);
        stdout
            .write_all(wrapped.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(CommandError::WriteHelp)
    }
}

fn render_help(layout: &dyn DefaultCommand, registry: &CommandRegistry, width: usize) -> String {
    let mut help = layout.help_intro(width);
    for spec in registry {
        if spec.is_first_of_group() {
            help.push('\n');
        }
        help.push_str(&layout.help_entry(spec, width));
    }
    help.push_str(&layout.help_trailer(width));
    help
}

fn reject_leftovers(args: &Arguments) -> Result<(), UsageError> {
    match args.peek_positional() {
        Some(argument) => {
            debug!(target: DISPATCH_TARGET, argument, "unconsumed positional argument");
            Err(UsageError::unexpected_argument(argument))
        }
        None => Ok(()),
    }
}
