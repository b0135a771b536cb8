// vitrine/src/web/handlers/checkout_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::checkout_pipeline::run_checkout;
use crate::services::payment_gateway::CheckoutRequest;
use crate::state::AppState;

/// Answers `{url}`. Anything but bad input comes back as one generic failure.
#[instrument(
    name = "handler::start_checkout",
    skip(app_state, req_payload),
    fields(item_id = %req_payload.item_id, price = req_payload.price)
)]
pub async fn start_checkout_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  match run_checkout(&app_state, req_payload.into_inner()).await {
    Ok(url) => {
      info!("Checkout session issued.");
      Ok(HttpResponse::Ok().json(json!({ "url": url })))
    }
    Err(e @ AppError::Validation { .. }) => Err(e),
    Err(e) => {
      warn!(error = %e, "Checkout failed.");
      Err(AppError::CheckoutFailed(e.to_string()))
    }
  }
}

/// Landing page of the mock processor's sessions: sends the buyer straight to
/// the success page.
#[instrument(
    name = "handler::mock_payment_session",
    skip(app_state, session_id),
    fields(session_id = %session_id.as_str())
)]
pub async fn mock_payment_session_handler(
  app_state: web::Data<AppState>,
  session_id: web::Path<String>,
) -> HttpResponse {
  info!("Mock payment completed; redirecting to the success page.");
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, format!("{}/success", app_state.config.app_base_url)))
    .finish()
}

/// Where the processor returns the buyer after paying.
#[instrument(name = "handler::checkout_success")]
pub async fn checkout_success_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "received",
    "message": "Thank you! Your order has been received.",
  }))
}
