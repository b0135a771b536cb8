// vitrine/src/pipelines/login_pipeline.rs

use crate::admin::session::AdminSession;
use crate::errors::AppError;
use crate::pipelines::contexts::LoginCtxData;
use crate::state::AppState;
use tracing::{event, info, instrument, warn, Level};
use vitrine_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl, PipelineResult};

/// Registers the admin login pipeline.
pub fn register_login_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<LoginCtxData, AppError>::new(&[
    ("validate_login_input", false, None),
    ("verify_admin_secret", false, None),
    ("open_admin_session", false, None),
  ]);

  // Step 1: Reject an empty password before any hashing work.
  p.on_root("validate_login_input", |ctx_data: ContextData<LoginCtxData>| {
    Box::pin(async move {
      if ctx_data.read().password.is_empty() {
        warn!("Empty password provided for admin login.");
        return Err(AppError::validation("password", "Password is required."));
      }
      Ok(PipelineControl::Continue)
    })
  });

  // Step 2: Verify against the stored Argon2 hash
  p.on_root("verify_admin_secret", |ctx_data: ContextData<LoginCtxData>| {
    Box::pin(async move {
      let (secret, password) = {
        // Read scope
        let guard = ctx_data.read();
        (guard.app_state.admin_secret.clone(), guard.password.clone())
      }; // guard dropped

      // Argon2 is CPU-bound.
      let matched = tokio::task::spawn_blocking(move || secret.matches(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Secret check did not complete: {}", e)))??;

      // Plaintext is not kept past verification.
      ctx_data.write().password.clear();

      if !matched {
        warn!("Admin login rejected.");
        return Err(AppError::AuthFailed("Invalid admin password.".to_string()));
      }
      event!(Level::DEBUG, "Admin secret verified.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Step 3: Issue the session token
  p.on_root("open_admin_session", |ctx_data: ContextData<LoginCtxData>| {
    Box::pin(async move {
      let sessions = ctx_data.read().app_state.sessions.clone();
      let session = sessions.open();
      info!(opened_at = %session.opened_at(), "Admin session opened.");
      ctx_data.write().session = Some(session);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  registry.register_pipeline(p);
}

/// Checks `password` against the admin secret and opens a session.
#[instrument(name = "login::run", skip_all)]
pub async fn run_login(app_state: &AppState, password: &str) -> Result<AdminSession, AppError> {
  let ctx = ContextData::new(LoginCtxData::new(app_state.clone(), password));
  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => ctx
      .read()
      .session
      .clone()
      .ok_or_else(|| AppError::Internal("Login completed without opening a session.".to_string())),
    PipelineResult::Stopped => {
      warn!("Login pipeline was stopped by a handler.");
      Err(AppError::AuthFailed("Login was halted.".to_string()))
    }
  }
}
