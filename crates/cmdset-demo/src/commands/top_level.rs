//! Behaviour when no command is named.

use cmdset::{Arguments, CommandError, CommandRegistry, DefaultCommand, OptionConfig, UsageError};
use tracing::debug;

use super::{COMMAND_TARGET, VERBOSE_HELP, add_verbosity, is_verbose};
use crate::PROGRAM;
use crate::logging::LogFormat;
use crate::output::OutputBuffer;

const VERSION: &str = "version";

/// Answers `--version` and lays out the aggregate help.
pub(crate) struct TopLevel {
    output: OutputBuffer,
}

impl TopLevel {
    pub(crate) const fn new(output: OutputBuffer) -> Self {
        Self { output }
    }
}

impl DefaultCommand for TopLevel {
    fn add_options(&self, options: &mut OptionConfig) {
        add_verbosity(options);
        options.boolean(VERSION).alias(VERSION, "V");
    }

    fn do_command(
        &mut self,
        registry: &CommandRegistry,
        args: Arguments,
    ) -> Result<(), CommandError> {
        if args.flag(VERSION) {
            if is_verbose(&args) {
                self.output
                    .line(format_args!("note: {} commands registered", registry.len()));
            }
            self.output
                .line(format_args!("{PROGRAM} {}", env!("CARGO_PKG_VERSION")));
            return Ok(());
        }
        debug!(target: COMMAND_TARGET, "no command or --version given");
        Err(UsageError::MissingCommand.into())
    }

    fn help_intro(&self, _width: usize) -> String {
        format!("Usage: {PROGRAM} [config flags] <command> [options] [arguments]\n\nCommands:\n")
    }

    fn help_trailer(&self, _width: usize) -> String {
        format!(
            "\nOptions:\n  -V, --version  Print the version and exit.\n{VERBOSE_HELP}  -h, --help     Print help.\n\n\
             Config flags, given before the command:\n  --help-width <columns>\n  --log-filter <filter>\n  --log-format <{formats}>\n\n\
             Run '{PROGRAM} <command> --help' for details of one command.\n",
            formats = LogFormat::choices(),
        )
    }
}
