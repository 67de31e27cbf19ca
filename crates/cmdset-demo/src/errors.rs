//! Failures of the demo application outside the dispatcher.

use std::io;
use std::sync::Arc;

use cmdset::SetupError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("argument '{0}' is not valid unicode")]
    NonUnicodeArgument(String),
    #[error("failed to register commands: {0}")]
    Setup(#[from] SetupError),
    #[error("failed to write command output: {0}")]
    WriteOutput(io::Error),
}
