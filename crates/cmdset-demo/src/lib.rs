//! Reference application for the `cmdset` dispatcher.
//!
//! [`run`] splits leading configuration flags off the argument list, loads
//! [`DemoConfig`], installs telemetry, and hands the remaining arguments to a
//! dispatcher holding the demo commands. The completion result becomes the
//! process exit code: `0` on success, `1` when a command fails, `2` for
//! usage errors.

use std::cell::RefCell;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::rc::Rc;

use cmdset::{CommandError, TerminalPrompt};
use tracing::debug;

mod commands;
mod config;
mod errors;
mod logging;
mod output;
pub mod telemetry;


use commands::SharedPrompt;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub use config::{DEFAULT_LOG_FILTER, DemoConfig};
use errors::AppError;
pub use logging::LogFormat;
use output::OutputBuffer;

pub(crate) const PROGRAM: &str = env!("CARGO_PKG_NAME");

const RUN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::run");
const USAGE_EXIT_CODE: u8 = 2;

/// Runs the demo using the provided arguments and IO handles.
///
/// `args` includes the program name. Confirmation prompts read from stdin.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let prompt: SharedPrompt = Rc::new(RefCell::new(TerminalPrompt::stdio()));
    run_with(args, stdout, stderr, &OrthoConfigLoader, &prompt)
}

pub(crate) fn run_with<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
    prompt: &SharedPrompt,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    match execute(&arguments, stdout, loader, prompt) {
        Ok(completion) => report(completion, stderr),
        Err(error) => {
            writeln!(stderr, "{error}").ok();
            ExitCode::FAILURE
        }
    }
}

fn execute<W, L>(
    args: &[OsString],
    stdout: &mut W,
    loader: &L,
    prompt: &SharedPrompt,
) -> Result<Result<(), CommandError>, AppError>
where
    W: Write,
    L: ConfigLoader,
{
    let split = split_config_arguments(args);
    let config = loader.load(&split.config_arguments)?;
    let log_format = telemetry::initialise(&config)?;
    debug!(target: RUN_TARGET, %log_format, help_width = config.help_width(), "configured");

    let command_arguments = args
        .get(split.command_start..)
        .unwrap_or_default()
        .iter()
        .map(|argument| {
            argument
                .to_str()
                .map(str::to_owned)
                .ok_or_else(|| AppError::NonUnicodeArgument(argument.to_string_lossy().into_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(target: RUN_TARGET, arguments = command_arguments.len(), "dispatching");

    let output = OutputBuffer::default();
    let mut dispatcher = commands::build_dispatcher(&config, &output, prompt)?;
    let completion = dispatcher.run(command_arguments, stdout);
    output.forward_to(stdout).map_err(AppError::WriteOutput)?;
    Ok(completion)
}

fn report<E: Write>(completion: Result<(), CommandError>, stderr: &mut E) -> ExitCode {
    match completion {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.is_usage() => {
            writeln!(stderr, "{error}").ok();
            writeln!(stderr, "Run '{PROGRAM} --help' for usage.").ok();
            ExitCode::from(USAGE_EXIT_CODE)
        }
        Err(error) => {
            writeln!(stderr, "{error}").ok();
            ExitCode::FAILURE
        }
    }
}
