// vitrine/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use vitrine_flow::FlowError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Invalid {field}: {message}")]
  Validation { field: String, message: String },

  #[error("Authentication Failed: {0}")]
  AuthFailed(String),

  #[error("Not Found: {0}")]
  NotFound(String),

  #[error("Item store unavailable: {0}")]
  StoreUnavailable(String),

  #[error("Image upload failed: {0}")]
  UploadFailed(String),

  #[error("Checkout failed: {0}")]
  CheckoutFailed(String),

  #[error("Confirmation required: {0}")]
  ConfirmationRequired(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn validation(field: &str, message: impl Into<String>) -> Self {
    AppError::Validation {
      field: field.to_string(),
      message: message.into(),
    }
  }

  /// Transient collaborator failures: shown as a dismissible notice, never retried.
  pub fn is_transient(&self) -> bool {
    matches!(
      self,
      AppError::StoreUnavailable(_) | AppError::UploadFailed(_) | AppError::CheckoutFailed(_)
    )
  }

  /// Short text suitable for showing to the person at the keyboard.
  pub fn user_message(&self) -> String {
    match self {
      AppError::Validation { message, .. } => message.clone(),
      AppError::AuthFailed(_) => "Wrong password.".to_string(),
      AppError::NotFound(_) => "That watch could not be found.".to_string(),
      AppError::StoreUnavailable(_) => "The inventory could not be reached. Please try again.".to_string(),
      AppError::UploadFailed(_) => "An image failed to upload.".to_string(),
      AppError::CheckoutFailed(_) => "Checkout could not be started. Please try again.".to_string(),
      AppError::ConfirmationRequired(m) => m.clone(),
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        "Something went wrong.".to_string()
      }
    }
  }
}

impl From<sqlx::Error> for AppError {
  fn from(err: sqlx::Error) -> Self {
    match err {
      sqlx::Error::RowNotFound => AppError::NotFound("No matching record.".to_string()),
      other => AppError::StoreUnavailable(other.to_string()),
    }
  }
}

impl From<reqwest::Error> for AppError {
  fn from(err: reqwest::Error) -> Self {
    AppError::CheckoutFailed(err.to_string())
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AppError>() {
      Ok(app_err) => app_err,
      Err(err) => match err.downcast::<sqlx::Error>() {
        Ok(sqlx_err) => AppError::from(sqlx_err),
        Err(err) => AppError::Internal(err.to_string()),
      },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation { .. } => StatusCode::BAD_REQUEST,
      AppError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::UploadFailed(_) | AppError::CheckoutFailed(_) => StatusCode::BAD_GATEWAY,
      AppError::ConfirmationRequired(_) => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    match self {
      AppError::Validation { field, message } => {
        HttpResponse::build(status).json(json!({"error": message, "field": field}))
      }
      AppError::AuthFailed(m) => HttpResponse::build(status).json(json!({"success": false, "error": m})),
      AppError::NotFound(m) => HttpResponse::build(status).json(json!({"error": m})),
      AppError::ConfirmationRequired(m) => HttpResponse::build(status).json(json!({"error": m})),
      AppError::Workflow { source } => {
        tracing::error!(flow_error_source = ?source, "Workflow error details");
        HttpResponse::build(status).json(json!({"error": "Workflow processing error"}))
      }
      // Collaborator and internal details stay in the logs.
      other => HttpResponse::build(status).json(json!({"error": other.user_message()})),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

