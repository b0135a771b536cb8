// vitrine/src/admin/session.rs

//! Admin sessions: a token per successful login, held until logout.

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::{http::header, web, FromRequest, HttpRequest};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand_core::{OsRng, RngCore};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Proof that the caller passed the admin secret check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
  token: String,
  opened_at: DateTime<Utc>,
}

impl AdminSession {
  pub fn token(&self) -> &str {
    &self.token
  }

  pub fn opened_at(&self) -> DateTime<Utc> {
    self.opened_at
  }
}

#[derive(Default)]
pub struct AdminSessions {
  open: RwLock<HashMap<String, DateTime<Utc>>>,
}

fn new_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

impl AdminSessions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn open(&self) -> AdminSession {
    let session = AdminSession {
      token: new_token(),
      opened_at: Utc::now(),
    };
    self.open.write().insert(session.token.clone(), session.opened_at);
    debug!(open_sessions = self.len(), "Admin session opened.");
    session
  }

  pub fn resume(&self, token: &str) -> Option<AdminSession> {
    self.open.read().get(token).map(|opened_at| AdminSession {
      token: token.to_string(),
      opened_at: *opened_at,
    })
  }

  pub fn is_open(&self, session: &AdminSession) -> bool {
    self.open.read().contains_key(&session.token)
  }

  /// `false` when the session was already closed.
  pub fn close(&self, session: &AdminSession) -> bool {
    self.open.write().remove(&session.token).is_some()
  }

  pub fn len(&self) -> usize {
    self.open.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.open.read().is_empty()
  }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  req
    .headers()
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
}

impl FromRequest for AdminSession {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let Some(app_state) = req.app_data::<web::Data<AppState>>() else {
      return futures_util::future::ready(Err(AppError::Internal(
        "Application state is not configured.".to_string(),
      )));
    };
    let session = bearer_token(req).and_then(|token| app_state.sessions.resume(token));
    match session {
      Some(session) => futures_util::future::ready(Ok(session)),
      None => {
        warn!(path = %req.path(), "Admin request without a valid session.");
        futures_util::future::ready(Err(AppError::AuthFailed("Admin session required.".to_string())))
      }
    }
  }
}
