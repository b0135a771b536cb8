// vitrine/src/state.rs

use crate::admin::session::AdminSessions;
use crate::catalog::CatalogRepository;
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};
use crate::pipelines;
use crate::services::auth_service::AdminSecret;
use crate::services::blob_store::{BlobStore, LocalBlobStore, MemoryBlobStore};
use crate::services::item_store::{ItemStore, MemoryItemStore};
use crate::services::payment_gateway::{HttpPaymentGateway, PaymentGateway};
use crate::services::payment_mock::MockPaymentGateway;
use crate::services::pg_item_store::PgItemStore;
use std::sync::Arc;
use tracing::info;
use vitrine_flow::FlowRegistry;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<CatalogRepository>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub config: Arc<AppConfig>,
  pub sessions: Arc<AdminSessions>,
  pub payments: Arc<dyn PaymentGateway>,
  pub admin_secret: AdminSecret,
}

impl AppState {
  /// Hashes the admin secret, then assembles the state.
  pub fn new(
    config: AppConfig,
    items: Arc<dyn ItemStore>,
    blobs: Arc<dyn BlobStore>,
    payments: Arc<dyn PaymentGateway>,
  ) -> AppResult<Self> {
    let admin_secret = AdminSecret::from_plaintext(&config.admin_password)?;
    Ok(Self::with_admin_secret(config, admin_secret, items, blobs, payments))
  }

  /// Assembles the state around an already hashed secret and registers every
  /// pipeline. The plaintext password in `config` is dropped.
  pub fn with_admin_secret(
    mut config: AppConfig,
    admin_secret: AdminSecret,
    items: Arc<dyn ItemStore>,
    blobs: Arc<dyn BlobStore>,
    payments: Arc<dyn PaymentGateway>,
  ) -> Self {
    config.admin_password.clear();

    let flows = Arc::new(FlowRegistry::<AppError>::new());
    pipelines::register_all_pipelines(&flows);

    Self {
      catalog: Arc::new(CatalogRepository::new(items, blobs)),
      flows,
      config: Arc::new(config),
      sessions: Arc::new(AdminSessions::new()),
      payments,
      admin_secret,
    }
  }

  /// Picks each collaborator's backend from the configuration.
  pub async fn from_config(config: AppConfig) -> AppResult<Self> {
    let items: Arc<dyn ItemStore> = match &config.database_url {
      Some(url) => {
        let store = PgItemStore::connect(url).await?;
        store.ensure_schema().await?;
        info!("Item store: PostgreSQL.");
        Arc::new(store)
      }
      None => {
        info!("Item store: in-memory (DATABASE_URL not set).");
        Arc::new(MemoryItemStore::new())
      }
    };

    let blobs: Arc<dyn BlobStore> = match &config.media_dir {
      Some(dir) => {
        info!(media_dir = %dir.display(), "Blob store: local directory.");
        Arc::new(LocalBlobStore::open(dir.clone(), config.app_base_url.clone()).await?)
      }
      None => {
        info!("Blob store: in-memory (MEDIA_DIR not set).");
        Arc::new(MemoryBlobStore::new(config.app_base_url.clone()))
      }
    };

    let payments: Arc<dyn PaymentGateway> = match (&config.payment_endpoint, &config.payment_api_key) {
      (Some(endpoint), Some(api_key)) => {
        info!(%endpoint, "Payment processor: HTTP.");
        Arc::new(HttpPaymentGateway::new(endpoint.clone(), api_key.clone()))
      }
      _ => {
        info!("Payment processor: mock (PAYMENT_ENDPOINT not set).");
        Arc::new(MockPaymentGateway::new(config.app_base_url.clone()))
      }
    };

    Self::new(config, items, blobs, payments)
  }
}
