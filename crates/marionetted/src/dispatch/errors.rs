//! Failure taxonomy for command dispatch.
//!
//! Every failure a handler can raise maps to exactly one wire response, and
//! the mapping happens in exactly one place: the dispatcher. Handlers do not
//! recover from failures; they raise immediately and let the dispatch
//! boundary turn the value into an HTTP status and body.

use marionette_engine::EngineError;
use thiserror::Error;

/// Failures surfaced while resolving and executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required parameter was absent or empty. An empty value is
    /// indistinguishable from an omitted one on this protocol.
    #[error("{}", missing_parameter_message(.label, .index))]
    ParameterMissing {
        /// Human-readable description of the parameter.
        label: String,
        /// Ordinal position, when the parameter is positional.
        index: Option<u32>,
    },

    /// A parameter was present but semantically wrong.
    #[error("{message}")]
    InvalidInput {
        /// Description of what was wrong.
        message: String,
    },

    /// The resolved target's kind does not support the command. The
    /// dispatcher formats the client-facing message, which names the
    /// command.
    #[error("the target does not support this command")]
    UnsupportedTarget,

    /// The command name is not in the command table.
    #[error("Unknown command - '{command}'")]
    UnknownCommand {
        /// The unrecognised name.
        command: String,
    },

    /// The `ref` parameter was absent or empty.
    #[error("Expected ref id, found none")]
    MissingRef,

    /// The `ref` parameter was present but not an integer.
    #[error("Ref id should be a number")]
    RefNotNumeric,

    /// The `ref` parameter named a handle that is not registered.
    #[error("Invalid ref id")]
    UnknownRef,

    /// A failure raised inside the automation engine that the handler did
    /// not recognise as one of the declared kinds.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A bookkeeping failure inside the daemon itself.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl CommandError {
    /// Creates an invalid-input failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a missing-parameter failure for a positional parameter.
    pub fn missing_positional(label: impl Into<String>, index: u32) -> Self {
        Self::ParameterMissing {
            label: label.into(),
            index: Some(index),
        }
    }

    /// Creates a missing-parameter failure for a named parameter.
    pub fn missing_named(label: impl Into<String>) -> Self {
        Self::ParameterMissing {
            label: label.into(),
            index: None,
        }
    }

    /// Creates an internal failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status the failure maps to: caller errors are 400, anything
    /// unclassified is 500.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ParameterMissing { .. }
            | Self::InvalidInput { .. }
            | Self::UnsupportedTarget
            | Self::UnknownCommand { .. }
            | Self::MissingRef
            | Self::RefNotNumeric
            | Self::UnknownRef => 400,
            Self::Engine(_) | Self::Internal { .. } => 500,
        }
    }

    /// Client-facing response body. `command` is the command named in the
    /// request, used by the wrong-target message.
    #[must_use]
    pub fn response_body(&self, command: &str) -> String {
        match self {
            Self::UnsupportedTarget => {
                format!("'{command}' is not valid for the specified target")
            }
            other => other.to_string(),
        }
    }
}

fn missing_parameter_message(label: &str, index: &Option<u32>) -> String {
    match index {
        Some(position) => format!("Expected parameter '{position}' ({label}), found none"),
        None => format!("Expected parameter '{label}', found none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_missing_parameter_names_index_and_label() {
        let error = CommandError::missing_positional("application path", 1);
        let message = error.to_string();
        assert!(message.contains('1'));
        assert!(message.contains("application path"));
    }

    #[test]
    fn named_missing_parameter_names_label_only() {
        let error = CommandError::missing_named("by");
        assert_eq!(error.to_string(), "Expected parameter 'by', found none");
    }

    #[test]
    fn unsupported_target_body_names_the_command() {
        let error = CommandError::UnsupportedTarget;
        assert_eq!(
            error.response_body("click"),
            "'click' is not valid for the specified target"
        );
    }

    #[test]
    fn caller_errors_map_to_400_and_unclassified_to_500() {
        assert_eq!(CommandError::MissingRef.http_status(), 400);
        assert_eq!(CommandError::UnknownRef.http_status(), 400);
        assert_eq!(CommandError::UnsupportedTarget.http_status(), 400);
        assert_eq!(CommandError::internal("bookkeeping").http_status(), 500);
        assert_eq!(
            CommandError::from(marionette_engine::EngineError::ApplicationStopped).http_status(),
            500
        );
    }
}
