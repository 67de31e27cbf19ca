//! `clean [--force]`.

use cmdset::{Arguments, Command, CommandContext, CommandError, OptionConfig, command_error};
use tracing::info;

use super::{COMMAND_TARGET, SharedPrompt, VERBOSE_HELP, add_verbosity, is_verbose};
use crate::output::OutputBuffer;

const FORCE: &str = "force";

const QUESTION: &str = "Remove build artefacts?";

pub(crate) struct Clean {
    output: OutputBuffer,
    prompt: SharedPrompt,
}

impl Clean {
    pub(crate) const fn new(output: OutputBuffer, prompt: SharedPrompt) -> Self {
        Self { output, prompt }
    }

    fn confirmed(&self) -> Result<bool, CommandError> {
        self.prompt
            .borrow_mut()
            .confirm(QUESTION)
            .map_err(|error| command_error!("failed to read confirmation: {error}"))
    }
}

impl Command for Clean {
    fn add_options(&self, options: &mut OptionConfig) {
        add_verbosity(options);
        options.boolean(FORCE).alias(FORCE, "f");
    }

    fn do_command(
        &mut self,
        _context: &CommandContext<'_>,
        args: Arguments,
    ) -> Result<(), CommandError> {
        let forced = args.flag(FORCE);
        if forced && is_verbose(&args) {
            self.output.line("note: skipping confirmation");
        }
        if !forced && !self.confirmed()? {
            self.output.line("Clean cancelled.");
            return Ok(());
        }
        info!(target: COMMAND_TARGET, forced, "removing build artefacts");
        self.output.line("Removed build artefacts.");
        Ok(())
    }

    fn help(&self, context: &CommandContext<'_>, width: usize) -> String {
        format!(
            "{}\nOptions:\n  -f, --force    Do not ask for confirmation.\n{VERBOSE_HELP}",
            context.summary_help(width)
        )
    }
}
