use std::process::ExitCode;

use crate::store::StoreError;

/// Failures from command dispatch.
///
/// "No roll call in progress" is a normal reply, not an error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BotError {
    #[error("unrecognized command: {name}")]
    UnrecognizedCommand { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that cause whosin to exit with a specific code.
#[derive(Debug, thiserror::Error)]
pub enum ExitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}

impl ExitError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::from(2),
            Self::Store(_) => ExitCode::from(3),
            Self::Other(_) => ExitCode::from(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_pass_through_unchanged() {
        let err: BotError = StoreError::Backend("disk full".to_string()).into();
        assert_eq!(err.to_string(), "store backend error: disk full");
        assert_eq!(
            err,
            BotError::Store(StoreError::Backend("disk full".to_string()))
        );
    }

    #[test]
    fn unrecognized_command_message() {
        let err = BotError::UnrecognizedCommand {
            name: "dance".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognized command: dance");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(
            ExitError::Config("bad".to_string()).exit_code(),
            ExitCode::from(2)
        );
        assert_eq!(
            ExitError::Store(StoreError::NoRollCall { chat_id: 1 }).exit_code(),
            ExitCode::from(3)
        );
        assert_eq!(
            ExitError::Other("x".to_string()).exit_code(),
            ExitCode::from(1)
        );
    }
}
