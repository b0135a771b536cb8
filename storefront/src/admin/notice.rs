// vitrine/src/admin/notice.rs

use crate::errors::AppError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
  Success,
  Error,
}

/// A dismissible message shown in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
  pub kind: NoticeKind,
  pub message: String,
}

impl Notice {
  pub fn success(message: impl Into<String>) -> Self {
    Self {
      kind: NoticeKind::Success,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self {
      kind: NoticeKind::Error,
      message: message.into(),
    }
  }

  pub fn is_error(&self) -> bool {
    self.kind == NoticeKind::Error
  }
}

impl From<&AppError> for Notice {
  fn from(err: &AppError) -> Self {
    Notice::error(err.user_message())
  }
}
