//! Routes `tracing` events from the dispatcher and the demo commands to
//! stderr.
//!
//! Stdout belongs to command output, so log lines never go there. The first
//! successful [`initialise`] wins for the life of the process; later calls
//! report the format already in place.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::DemoConfig;
use crate::logging::LogFormat;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Reasons stderr logging could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `--log-filter` held a directive `EnvFilter` rejects.
    #[error("log filter '{directive}' is invalid: {source}")]
    Filter {
        /// The directive as configured.
        directive: String,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// Something else already owns the global subscriber.
    #[error("another tracing subscriber is already installed: {0}")]
    Install(#[source] SetGlobalDefaultError),
}

/// Installs the stderr subscriber described by `config`.
///
/// Returns the format in effect, which is the first installed one when the
/// demo runs more than once in a process.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the log filter does not parse and
/// [`TelemetryError::Install`] when a foreign subscriber is already global.
pub fn initialise(config: &DemoConfig) -> Result<LogFormat, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| {
            let format = config.log_format();
            let subscriber = stderr_subscriber(format, config.log_filter())?;
            tracing::subscriber::set_global_default(subscriber)
                .map_err(TelemetryError::Install)?;
            Ok(format)
        })
        .copied()
}

fn stderr_subscriber(
    format: LogFormat,
    directive: &str,
) -> Result<BoxedSubscriber, TelemetryError> {
    let filter = EnvFilter::try_new(directive).map_err(|source| TelemetryError::Filter {
        directive: directive.to_owned(),
        source,
    })?;
    // Escape codes would corrupt JSON consumers even on a terminal.
    let ansi = !format.is_structured() && io::stderr().is_terminal();
    let base = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_timer(UtcTime::rfc_3339());

    Ok(match format {
        LogFormat::Compact => Box::new(base.compact().with_target(true).finish()),
        LogFormat::Json => Box::new(
            base.json()
                .flatten_event(true)
                .with_current_span(false)
                .finish(),
        ),
    })
}
