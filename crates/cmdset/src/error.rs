//! Error taxonomy for command dispatch.
//!
//! Three enums keep the failure classes apart:
//!
//! - [`UsageError`] reports that the operator's input was invalid. Validation
//!   hooks may only fail with this type.
//! - [`CommandError`] reports that a command could not complete. It wraps
//!   [`UsageError`] so a single result type reaches the embedding
//!   application.
//! - [`SetupError`] reports programming mistakes in the command registry. It
//!   is returned while commands are being registered and never reaches a
//!   dispatch result.

use std::io;

use thiserror::Error;

/// The operator supplied invalid input.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A handler rejected an option value or positional argument.
    #[error("{message}")]
    Invalid {
        /// Human-readable description of the problem.
        message: String,
    },
    /// The first argument named a command that is not registered.
    #[error("unrecognized command '{name}'")]
    UnknownCommand {
        /// The command name exactly as supplied.
        name: String,
    },
    /// Commands are registered but none was named.
    #[error("missing command argument")]
    MissingCommand,
    /// More positional arguments were supplied than the command consumes.
    #[error("unexpected argument '{argument}'")]
    UnexpectedArgument {
        /// The first positional left unconsumed by validation.
        argument: String,
    },
}

impl UsageError {
    /// Builds an [`UsageError::Invalid`] from any displayable message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Builds an [`UsageError::UnexpectedArgument`] for `argument`.
    pub fn unexpected_argument(argument: impl Into<String>) -> Self {
        Self::UnexpectedArgument {
            argument: argument.into(),
        }
    }
}

/// A command could not complete.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command ran and reported a failure.
    #[error("{message}")]
    Failed {
        /// Human-readable description of the failure.
        message: String,
    },
    /// The default path was taken and no behaviour is defined for it.
    #[error("command not implemented")]
    NotImplemented,
    /// The operator's input was rejected.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// Help text could not be written to the output stream.
    #[error("failed to write help output: {0}")]
    WriteHelp(#[source] io::Error),
}

impl CommandError {
    /// Builds a [`CommandError::Failed`] from any displayable message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns `true` when the failure was caused by invalid input.
    ///
    /// Embedding applications use this to decide whether to point the
    /// operator at `--help`.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Returns the usage error wrapped by this failure, if any.
    #[must_use]
    pub const fn as_usage(&self) -> Option<&UsageError> {
        match self {
            Self::Usage(usage) => Some(usage),
            _ => None,
        }
    }

    /// Returns the offending literal when too many positionals were supplied.
    #[must_use]
    pub fn unexpected_argument(&self) -> Option<&str> {
        match self.as_usage() {
            Some(UsageError::UnexpectedArgument { argument }) => Some(argument.as_str()),
            _ => None,
        }
    }
}

/// A command registration was malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// The syntax string contained no command name.
    #[error("command syntax '{syntax}' does not start with a command name")]
    MissingName {
        /// The syntax string as supplied.
        syntax: String,
    },
    /// The command name looked like an option flag.
    #[error("command name '{name}' must not start with a dash")]
    DashedName {
        /// The rejected name.
        name: String,
    },
    /// Two commands normalise to the same name.
    #[error("command '{name}' is already registered")]
    DuplicateCommand {
        /// The normalised name shared by both registrations.
        name: String,
    },
}

/// Formats a [`CommandError::Failed`].
///
/// ```rust,ignore
/// return Err(command_error!("cannot open {}", path.display()));
/// ```
#[macro_export]
macro_rules! command_error {
    ($($arg:tt)*) => {
        $crate::CommandError::failed(::std::format!($($arg)*))
    };
}

/// Formats a [`UsageError::Invalid`].
///
/// ```rust,ignore
/// return Err(usage_error!("invalid count '{value}'"));
/// ```
#[macro_export]
macro_rules! usage_error {
    ($($arg:tt)*) => {
        $crate::UsageError::invalid(::std::format!($($arg)*))
    };
}
