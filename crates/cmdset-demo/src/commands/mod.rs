//! Commands registered by the demo binary.
//!
//! Every handler composes [`add_verbosity`] into its own option declarations
//! rather than inheriting it, and writes results to the shared
//! [`OutputBuffer`].

mod add;
mod clean;
mod hello;
mod top_level;

use std::cell::RefCell;
use std::rc::Rc;

use cmdset::{Arguments, CommandSpec, Confirm, Dispatcher, OptionConfig, SetupError};

use crate::config::DemoConfig;
use crate::output::OutputBuffer;

pub(crate) use top_level::TopLevel;

/// Confirmation prompt shared by every handler created during a run.
pub(crate) type SharedPrompt = Rc<RefCell<dyn Confirm>>;

/// Tracing target for demo command events.
pub(crate) const COMMAND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::commands");

const VERBOSE: &str = "verbose";

/// Help line for the option added by [`add_verbosity`].
pub(crate) const VERBOSE_HELP: &str = "  -v, --verbose  Print progress notes.\n";

/// Declares `--verbose`/`-v`.
pub(crate) fn add_verbosity(options: &mut OptionConfig) {
    options.boolean(VERBOSE).alias(VERBOSE, "v");
}

pub(crate) fn is_verbose(args: &Arguments) -> bool {
    args.flag(VERBOSE)
}

/// Builds the dispatcher with every demo command registered.
pub(crate) fn build_dispatcher(
    config: &DemoConfig,
    output: &OutputBuffer,
    prompt: &SharedPrompt,
) -> Result<Dispatcher<TopLevel>, SetupError> {
    let mut dispatcher = Dispatcher::with_default_command(TopLevel::new(output.clone()))
        .with_help_width(config.help_width());

    let hello_output = output.clone();
    let add_output = output.clone();
    let clean_output = output.clone();
    let clean_prompt = Rc::clone(prompt);

    dispatcher
        .add_commands([
            CommandSpec::new(
                "hello [name]",
                "Prints a greeting for name, or for the world when no name is given.",
                move || hello::Hello::new(hello_output.clone()),
            )?,
            CommandSpec::new(
                "add <number> <number>...",
                "Prints the sum of two or more integers.",
                move || add::Add::new(add_output.clone()),
            )?,
        ])?
        .add_commands([CommandSpec::new(
            "clean [--force]",
            "Removes build artefacts after asking for confirmation.",
            move || clean::Clean::new(clean_output.clone(), Rc::clone(&clean_prompt)),
        )?])?;

    Ok(dispatcher)
}
