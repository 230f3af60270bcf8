use crate::core::command::CommandError;
use crate::core::domain::Configuration;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Configuration,
}

impl AppState {
    pub fn new(config: Configuration) -> AppState {
        AppState {
            config,
        }
    }
}

// ConsoleError is the line shown to the operator when a command fails
pub type ConsoleError = String;

impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::DuplicateKey { .. } | CommandError::NotFound { .. } | CommandError::Validation { .. } => {
                AppError::Rejected(format!("Error: {}", err))
            }
            CommandError::Runtime { .. } | CommandError::Serialization { .. } => {
                tracing::error!(error = ?err, "catalog command failed");
                AppError::Failed(format!("Error: {}", err))
            }
        }
    }
}

// AppError separates operator mistakes from internal failures; both are shown and the loop goes on
#[derive(Debug, PartialEq)]
pub enum AppError {
    Rejected(ConsoleError),
    Failed(ConsoleError),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::Rejected(msg) => msg.as_str(),
            AppError::Failed(msg) => msg.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::controller::{AppError, AppState};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_state() {
        let state = AppState::new(Configuration::new("test"));
        assert_eq!("test", state.config.branch_id.as_str());
    }

    #[tokio::test]
    async fn test_should_map_command_errors() {
        let err = AppError::from(CommandError::NotFound { message: "book not found for 42".to_string() });
        assert_eq!(AppError::Rejected("Error: book not found for 42".to_string()), err);

        let err = AppError::from(CommandError::Runtime { message: "boom".to_string(), reason_code: None, retryable: false });
        assert!(matches!(err, AppError::Failed(_)));
        assert_eq!("Error: boom", err.message());
    }
}
