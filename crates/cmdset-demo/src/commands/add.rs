//! `add <number> <number>...`.

use cmdset::{
    Arguments, Command, CommandContext, CommandError, OptionConfig, UsageError, command_error,
    usage_error,
};
use tracing::debug;

use super::{COMMAND_TARGET, VERBOSE_HELP, add_verbosity, is_verbose};
use crate::output::OutputBuffer;

const MIN_OPERANDS: usize = 2;

pub(crate) struct Add {
    output: OutputBuffer,
    operands: Vec<i64>,
}

impl Add {
    pub(crate) const fn new(output: OutputBuffer) -> Self {
        Self {
            output,
            operands: Vec::new(),
        }
    }
}

impl Command for Add {
    fn add_options(&self, options: &mut OptionConfig) {
        add_verbosity(options);
    }

    fn parse_args(
        &mut self,
        _context: &CommandContext<'_>,
        args: &mut Arguments,
    ) -> Result<(), UsageError> {
        while let Some(operand) = args.take_parsed::<i64>("number")? {
            self.operands.push(operand);
        }
        if self.operands.len() < MIN_OPERANDS {
            return Err(usage_error!(
                "add needs at least {MIN_OPERANDS} numbers, got {}",
                self.operands.len()
            ));
        }
        Ok(())
    }

    fn do_command(
        &mut self,
        _context: &CommandContext<'_>,
        args: Arguments,
    ) -> Result<(), CommandError> {
        debug!(target: COMMAND_TARGET, operands = self.operands.len(), "summing");
        if is_verbose(&args) {
            let terms: Vec<String> = self.operands.iter().map(ToString::to_string).collect();
            self.output
                .line(format_args!("note: adding {}", terms.join(" + ")));
        }
        let total = self
            .operands
            .iter()
            .try_fold(0_i64, |sum, operand| sum.checked_add(*operand))
            .ok_or_else(|| command_error!("sum overflows a 64-bit integer"))?;
        self.output.line(total);
        Ok(())
    }

    fn help(&self, context: &CommandContext<'_>, width: usize) -> String {
        format!("{}\nOptions:\n{VERBOSE_HELP}", context.summary_help(width))
    }
}
