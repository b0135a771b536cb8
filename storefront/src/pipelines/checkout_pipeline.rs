// vitrine/src/pipelines/checkout_pipeline.rs

use crate::admin::notice::Notice;
use crate::errors::AppError;
use crate::pipelines::contexts::CheckoutCtxData;
use crate::services::payment_gateway::{CheckoutRequest, SessionRequest};
use crate::state::AppState;
use tracing::{error, info, instrument, warn};
use vitrine_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl, PipelineResult};

/// validate → ask the processor for a session → take its redirect URL.
/// Never touches the item store.
pub fn register_checkout_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(&[
    ("validate_checkout_request", false, None),
    ("request_payment_session", false, None),
    ("resolve_redirect_url", false, None),
  ]);

  // Step 1: Validate the buyer's request
  p.on_root("validate_checkout_request", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let request = ctx_data.read().request.clone();
      if request.item_id.trim().is_empty() {
        return Err(AppError::validation("itemId", "An item is required."));
      }
      if request.display_name.trim().is_empty() {
        return Err(AppError::validation("displayName", "A display name is required."));
      }
      if !request.price.is_finite() || request.price < 0.0 {
        return Err(AppError::validation("price", "Price must be a non-negative number."));
      }
      Ok(PipelineControl::Continue)
    })
  });

  // Step 2: Ask the processor for a session. Any failure is a checkout failure.
  p.on_root("request_payment_session", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (gateway, session_request) = {
        // Read scope
        let guard = ctx_data.read();
        (
          guard.app_state.payments.clone(),
          SessionRequest::for_checkout(&guard.request, &guard.app_state.config.app_base_url),
        )
      }; // guard dropped before the network call

      let session = gateway.create_session(&session_request).await.map_err(|e| {
        error!(error = %e, item_id = %session_request.item_id, "Payment session request failed.");
        match e {
          AppError::CheckoutFailed(_) => e,
          other => AppError::CheckoutFailed(other.to_string()),
        }
      })?;

      let mut guard = ctx_data.write();
      guard.session_request = Some(session_request);
      guard.session = Some(session);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Step 3: The session must carry a non-blank redirect URL
  p.on_root("resolve_redirect_url", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let url = ctx_data
        .read()
        .session
        .as_ref()
        .and_then(|s| s.url.clone())
        .filter(|u| !u.trim().is_empty());
      match url {
        Some(url) => {
          ctx_data.write().redirect_url = Some(url);
          Ok(PipelineControl::Continue)
        }
        None => {
          warn!("Payment session came back without a redirect URL.");
          Err(AppError::CheckoutFailed("Session response carried no url.".to_string()))
        }
      }
    })
  });

  registry.register_pipeline(p);
}

/// Where the buyer goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
  /// Navigate to exactly this URL.
  Redirect(String),
  /// Stay on the page and show the notice.
  Failed(Notice),
}

#[instrument(name = "checkout::initiate", skip(app_state, request), fields(item_id = %request.item_id))]
pub async fn run_checkout(app_state: &AppState, request: CheckoutRequest) -> Result<String, AppError> {
  let ctx = ContextData::new(CheckoutCtxData::new(app_state.clone(), request));
  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => {
      let url = ctx.read().redirect_url.clone();
      let url = url.ok_or_else(|| AppError::CheckoutFailed("Checkout completed without a url.".to_string()))?;
      info!("Checkout session ready.");
      Ok(url)
    }
    PipelineResult::Stopped => Err(AppError::CheckoutFailed("Checkout was halted.".to_string())),
  }
}

/// One attempt, no retry. Every failure becomes the same generic notice.
pub async fn initiate_checkout(app_state: &AppState, request: CheckoutRequest) -> CheckoutOutcome {
  match run_checkout(app_state, request).await {
    Ok(url) => CheckoutOutcome::Redirect(url),
    Err(e) => {
      warn!(error = %e, "Checkout failed.");
      let generic = AppError::CheckoutFailed(e.to_string());
      CheckoutOutcome::Failed(Notice::from(&generic))
    }
  }
}
