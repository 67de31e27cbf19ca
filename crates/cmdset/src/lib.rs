//! Subcommand dispatch for multi-command CLIs.
//!
//! A [`Dispatcher`] owns a registry of [`CommandSpec`]s. Given a raw argument
//! vector it decides whether the first argument names a command, composes the
//! option declarations contributed for that path, tokenizes the arguments,
//! answers `--help`, validates positionals, and finally executes the selected
//! [`Command`] or the dispatcher's [`DefaultCommand`].
//!
//! ```rust,ignore
//! let mut dispatcher = Dispatcher::new().with_help_width(72);
//! dispatcher.add_commands([CommandSpec::new("hello [name]", "Says hello.", Hello::default)?])?;
//! match dispatcher.run(std::env::args().skip(1), &mut std::io::stdout()) {
//!     Ok(()) => {}
//!     Err(error) if error.is_usage() => { /* print error and a --help hint */ }
//!     Err(error) => { /* print error */ }
//! }
//! ```
//!
//! Failures are split into [`UsageError`] (bad input), [`CommandError`] (the
//! command could not complete), and [`SetupError`] (the registry itself is
//! malformed, reported while commands are registered).

mod args;
mod command;
mod descriptor;
mod dispatcher;
mod error;
mod options;
mod prompt;
mod registry;
mod tokenizer;
mod wrap;

#[cfg(test)]
mod tests;

pub use args::Arguments;
pub use command::{Command, CommandContext};
pub use descriptor::CommandSpec;
pub use dispatcher::{DEFAULT_HELP_WIDTH, DefaultCommand, Dispatcher, NoDefaultCommand};
pub use error::{CommandError, SetupError, UsageError};
pub use options::{HELP_ALIAS, HELP_OPTION, Numeric, OptionConfig, OptionValue};
pub use prompt::{Confirm, TerminalPrompt, confirm};
pub use registry::CommandRegistry;
pub use tokenizer::{FlagTokenizer, OptionParser, ParsedOptions};
pub use wrap::wrap;
