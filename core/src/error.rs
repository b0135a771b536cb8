// vitrine-flow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the engine itself, as opposed to the errors a step handler returns.
///
/// Application error types implement `From<FlowError>` so a pipeline's run can
/// surface both kinds through one type.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Context type mismatch (expected {expected_type}, while {while_doing})")]
  TypeMismatch { expected_type: String, while_doing: String },

  #[error("Step handler or collaborator failed: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error ({scope}): {message}")]
  ConfigurationError { scope: String, message: String },

  #[error("Internal flow error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    // An anyhow error that already carries a FlowError keeps it as its source,
    // so callers can still downcast to the original variant.
    FlowError::HandlerError { source: err }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
