use thiserror::Error;

use super::flow::Step;

/// Rejected user input. The transition that produced it did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid input! Please enter a valid name")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Cannot {action} from the {step} screen")]
    InvalidTransition { step: Step, action: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pricing configuration - {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Pricing configuration has an empty flavor catalog")]
    EmptyCatalog,
}

pub type FlowResult<T> = Result<T, FlowError>;

