// vitrine/src/services/payment_gateway.rs

//! Outbound client for the payment processor's session endpoint.

use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

/// One item offered for purchase, as sent by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
  pub item_id: String,
  pub display_name: String,
  pub price: f64,
  #[serde(default)]
  pub image_url: String,
}

/// Body posted to the processor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
  pub item_id: String,
  pub name: String,
  pub price: f64,
  pub image_url: String,
  pub success_url: String,
  pub cancel_url: String,
}

impl SessionRequest {
  pub fn for_checkout(request: &CheckoutRequest, app_base_url: &str) -> Self {
    let base = app_base_url.trim_end_matches('/');
    Self {
      item_id: request.item_id.clone(),
      name: request.display_name.clone(),
      price: request.price,
      image_url: request.image_url.clone(),
      success_url: format!("{}/success", base),
      cancel_url: format!("{}/watch/{}", base, request.item_id),
    }
  }
}

/// What the processor answered. A session without `url` cannot be used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentSession {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub url: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
  async fn create_session(&self, request: &SessionRequest) -> AppResult<PaymentSession>;
}

pub struct HttpPaymentGateway {
  client: reqwest::Client,
  endpoint: String,
  api_key: String,
}

impl HttpPaymentGateway {
  pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      endpoint: endpoint.into(),
      api_key: api_key.into(),
    }
  }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
  #[instrument(name = "payment_gateway::create_session", skip(self, request), fields(item_id = %request.item_id, endpoint = %self.endpoint))]
  async fn create_session(&self, request: &SessionRequest) -> AppResult<PaymentSession> {
    let response = self
      .client
      .post(&self.endpoint)
      .bearer_auth(&self.api_key)
      .json(request)
      .send()
      .await
      .map_err(|e| {
        error!(error = %e, "Payment processor unreachable.");
        AppError::CheckoutFailed(e.to_string())
      })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      warn!(%status, body = %body, "Payment processor rejected the session request.");
      return Err(AppError::CheckoutFailed(format!("Processor answered {}", status)));
    }

    let session: PaymentSession = response.json().await?;
    info!(session_id = ?session.id, has_url = session.url.is_some(), "Payment session created.");
    Ok(session)
  }
}
