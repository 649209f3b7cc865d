//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] prints the
//! error and maps it to exit code `2`.

use meadow_engine::errors::{ActionError, EngineError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (history files, stdout/stderr writes, stdin)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command-line arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The engine refused an operation the command relied on
    #[error("Engine error: {0}")]
    Engine(String),
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Engine(e.to_string())
    }
}

impl From<ActionError> for CliError {
    fn from(e: ActionError) -> Self {
        CliError::Engine(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_a_category_prefix() {
        let e = CliError::InvalidInput("hands must be >= 1".into());
        assert_eq!(e.to_string(), "Invalid input: hands must be >= 1");

        let e: CliError = EngineError::HandAlreadyComplete.into();
        assert!(e.to_string().starts_with("Engine error: "));
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<(), CliError> {
            Err(std::io::Error::other("disk full"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(CliError::Io(_))));
    }
}
