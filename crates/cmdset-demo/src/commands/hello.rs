//! `hello [name]`.

use cmdset::{Arguments, Command, CommandContext, CommandError, OptionConfig, UsageError};

use super::{VERBOSE_HELP, add_verbosity, is_verbose};
use crate::output::OutputBuffer;

const DEFAULT_NAME: &str = "world";
const SHOUT: &str = "shout";

pub(crate) struct Hello {
    output: OutputBuffer,
    name: Option<String>,
}

impl Hello {
    pub(crate) const fn new(output: OutputBuffer) -> Self {
        Self { output, name: None }
    }
}

impl Command for Hello {
    fn add_options(&self, options: &mut OptionConfig) {
        add_verbosity(options);
        options.boolean(SHOUT).alias(SHOUT, "s");
    }

    fn parse_args(
        &mut self,
        _context: &CommandContext<'_>,
        args: &mut Arguments,
    ) -> Result<(), UsageError> {
        self.name = args.take_positional();
        Ok(())
    }

    fn do_command(
        &mut self,
        _context: &CommandContext<'_>,
        args: Arguments,
    ) -> Result<(), CommandError> {
        let name = self.name.as_deref().unwrap_or(DEFAULT_NAME);
        if is_verbose(&args) {
            self.output.line(format_args!("note: greeting {name}"));
        }
        let greeting = format!("Hello, {name}!");
        if args.flag(SHOUT) {
            self.output.line(greeting.to_uppercase());
        } else {
            self.output.line(greeting);
        }
        Ok(())
    }

    fn help(&self, context: &CommandContext<'_>, width: usize) -> String {
        format!(
            "{}\nOptions:\n  -s, --shout    Print the greeting in capitals.\n{VERBOSE_HELP}",
            context.summary_help(width)
        )
    }
}
