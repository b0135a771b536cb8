// vitrine/src/services/payment_mock.rs

//! Local stand-in for the payment processor, used when no endpoint is configured.

use crate::errors::{AppError, Result as AppResult};
use crate::services::payment_gateway::{PaymentGateway, PaymentSession, SessionRequest};
use async_trait::async_trait;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct MockPaymentGateway {
  base_url: String,
}

impl MockPaymentGateway {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
    }
  }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
  #[instrument(name = "payment_mock::create_session", skip(self, request), fields(item_id = %request.item_id, price = request.price))]
  async fn create_session(&self, request: &SessionRequest) -> AppResult<PaymentSession> {
    if request.price <= 0.0 {
      return Err(AppError::CheckoutFailed("Amount must be greater than zero".to_string()));
    }
    tokio::time::sleep(std::time::Duration::from_millis(50)).await; // Simulate network latency

    let session_id = format!("mock_cs_{}", Uuid::new_v4().simple());
    info!(%session_id, "Simulated payment session.");
    Ok(PaymentSession {
      url: Some(format!(
        "{}/mock-pay/session/{}",
        self.base_url.trim_end_matches('/'),
        session_id
      )),
      id: Some(session_id),
    })
  }
}
