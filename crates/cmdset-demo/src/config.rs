//! Configuration loading for the demo binary.
//!
//! Configuration flags are peeled off the front of the argument list and
//! handed to `ortho_config`; everything from the first other token onwards is
//! left for the dispatcher.

use std::ffi::{OsStr, OsString};

use cmdset::DEFAULT_HELP_WIDTH;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::logging::LogFormat;

/// Filter applied when no log filter is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI flags recognised by the configuration loader.
///
/// Must list every field of [`DemoConfig`] in its flag form.
const CONFIG_CLI_FLAGS: &[&str] = &["--help-width", "--log-filter", "--log-format"];

/// Layered settings for the demo binary.
///
/// Values come from defaults, then a configuration file, then
/// `CMDSET_DEMO_*` environment variables, then leading command-line flags.
///
/// The defaults layer always carries the help width and log filter, so a run
/// with no file, variable or flag still merges into a populated table.
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "CMDSET_DEMO")]
pub struct DemoConfig {
    /// Column at which help output wraps.
    #[ortho_config(default = DEFAULT_HELP_WIDTH)]
    pub help_width: Option<usize>,
    /// `tracing` filter directive, such as `cmdset=debug`.
    #[ortho_config(default = String::from(DEFAULT_LOG_FILTER))]
    pub log_filter: Option<String>,
    /// Format of log lines written to stderr.
    pub log_format: Option<LogFormat>,
}

impl DemoConfig {
    /// The configured help width, or the dispatcher default.
    #[must_use]
    pub fn help_width(&self) -> usize {
        self.help_width.unwrap_or(DEFAULT_HELP_WIDTH)
    }

    /// The configured log filter, or [`DEFAULT_LOG_FILTER`].
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// The configured log format, or [`LogFormat::Compact`].
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }
}

pub(crate) trait ConfigLoader {
    /// Loads configuration for the demo.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags must appear before the command name. Flags
    /// appearing later belong to the command and never reach the loader.
    fn load(&self, args: &[OsString]) -> Result<DemoConfig, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<DemoConfig, AppError> {
        DemoConfig::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Stop;
    }
    let (flag, has_inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*text, false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the recognised configuration flags.
    pub(crate) config_arguments: Vec<OsString>,
    /// Index of the first argument destined for the dispatcher.
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut command_start = 1;
    let mut tokens = rest.iter();
    while let Some(argument) = tokens.next() {
        let FlagAction::Include { needs_value } = process_config_flag(argument) else {
            break;
        };
        config_arguments.push(argument.clone());
        command_start += 1;
        if needs_value && let Some(value) = tokens.next() {
            config_arguments.push(value.clone());
            command_start += 1;
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}
