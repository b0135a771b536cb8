// vitrine/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::admin::session::AdminSession;
use crate::errors::AppError;
use crate::pipelines::login_pipeline::run_login;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequestPayload {
  #[serde(default)]
  pub password: String,
}

#[instrument(name = "handler::login", skip(app_state, req_payload))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  match run_login(&app_state, &req_payload.password).await {
    Ok(session) => {
      info!("Admin signed in.");
      Ok(HttpResponse::Ok().json(json!({
          "success": true,
          "token": session.token(),
      })))
    }
    Err(AppError::Validation { .. }) | Err(AppError::AuthFailed(_)) => {
      warn!("Admin sign-in refused.");
      Ok(HttpResponse::Unauthorized().json(json!({ "success": false })))
    }
    Err(other) => Err(other),
  }
}

#[instrument(name = "handler::logout", skip(app_state, session))]
pub async fn logout_handler(
  app_state: web::Data<AppState>,
  session: AdminSession,
) -> Result<HttpResponse, AppError> {
  let closed = app_state.sessions.close(&session);
  info!(closed, "Admin signed out.");
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
