// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use vitrine::config::AppConfig;
use vitrine::errors::{AppError, Result as AppResult};
use vitrine::models::{Item, ItemFields};
use vitrine::services::auth_service::AdminSecret;
use vitrine::services::blob_store::{Blob, BlobKey, BlobStore, MemoryBlobStore};
use vitrine::services::item_store::MemoryItemStore;
use vitrine::services::payment_gateway::{PaymentGateway, PaymentSession, SessionRequest};
use vitrine::state::AppState;

pub const ADMIN_PASSWORD: &str = "tourbillon-42";
pub const BASE_URL: &str = "http://shop.test";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Argon2 is slow in debug builds; hash the test secret once.
static ADMIN_SECRET: Lazy<AdminSecret> =
  Lazy::new(|| AdminSecret::from_plaintext(ADMIN_PASSWORD).expect("test secret hashes"));

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 8080,
    app_base_url: BASE_URL.to_string(),
    database_url: None,
    media_dir: None,
    admin_password: ADMIN_PASSWORD.to_string(),
    payment_endpoint: None,
    payment_api_key: None,
    seed_db: false,
  }
}

#[derive(Debug, Clone)]
pub enum ScriptedReply {
  Session(PaymentSession),
  Fail(String),
}

/// Payment processor double: answers every request with the same reply and
/// records what it was asked.
pub struct ScriptedGateway {
  reply: Mutex<ScriptedReply>,
  requests: Mutex<Vec<SessionRequest>>,
}

impl ScriptedGateway {
  pub fn new(reply: ScriptedReply) -> Self {
    Self {
      reply: Mutex::new(reply),
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn with_url(url: &str) -> Self {
    Self::new(ScriptedReply::Session(PaymentSession {
      id: Some("cs_test".to_string()),
      url: Some(url.to_string()),
    }))
  }

  pub fn set_reply(&self, reply: ScriptedReply) {
    *self.reply.lock() = reply;
  }

  pub fn requests(&self) -> Vec<SessionRequest> {
    self.requests.lock().clone()
  }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
  async fn create_session(&self, request: &SessionRequest) -> AppResult<PaymentSession> {
    self.requests.lock().push(request.clone());
    let reply = self.reply.lock().clone();
    match reply {
      ScriptedReply::Session(session) => Ok(session),
      ScriptedReply::Fail(message) => Err(AppError::CheckoutFailed(message)),
    }
  }
}

/// Blob store double with upload latency that shrinks with each call, so
/// later uploads finish before earlier ones. Records keys in completion order.
pub struct StaggeredBlobStore {
  inner: Arc<MemoryBlobStore>,
  calls: AtomicU64,
  step_ms: u64,
  completed: Mutex<Vec<String>>,
}

impl StaggeredBlobStore {
  pub fn new(inner: Arc<MemoryBlobStore>, step_ms: u64) -> Self {
    Self {
      inner,
      calls: AtomicU64::new(0),
      step_ms,
      completed: Mutex::new(Vec::new()),
    }
  }

  pub fn completed(&self) -> Vec<String> {
    self.completed.lock().clone()
  }
}

#[async_trait]
impl BlobStore for StaggeredBlobStore {
  async fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> AppResult<String> {
    let call = self.calls.fetch_add(1, Ordering::SeqCst);
    let delay = self.step_ms * 10u64.saturating_sub(call);
    tokio::time::sleep(Duration::from_millis(delay)).await;
    let url = self.inner.put(key, bytes).await?;
    self.completed.lock().push(key.as_str().to_string());
    Ok(url)
  }

  async fn get(&self, key: &BlobKey) -> AppResult<Option<Blob>> {
    self.inner.get(key).await
  }
}

pub struct Harness {
  pub state: AppState,
  pub items: Arc<MemoryItemStore>,
  pub blobs: Arc<MemoryBlobStore>,
  pub gateway: Arc<ScriptedGateway>,
}

pub fn harness() -> Harness {
  let blobs = Arc::new(MemoryBlobStore::new(BASE_URL));
  build_harness(blobs.clone(), blobs)
}

/// Same as `harness`, but uploads go through a `StaggeredBlobStore`.
pub fn harness_with_staggered_uploads(step_ms: u64) -> (Harness, Arc<StaggeredBlobStore>) {
  let blobs = Arc::new(MemoryBlobStore::new(BASE_URL));
  let staggered = Arc::new(StaggeredBlobStore::new(blobs.clone(), step_ms));
  (build_harness(blobs, staggered.clone()), staggered)
}

fn build_harness(blobs: Arc<MemoryBlobStore>, backend: Arc<dyn BlobStore>) -> Harness {
  setup_tracing();
  let items = Arc::new(MemoryItemStore::new());
  let gateway = Arc::new(ScriptedGateway::with_url("https://pay.example/session/abc"));
  let state = AppState::with_admin_secret(
    test_config(),
    ADMIN_SECRET.clone(),
    items.clone(),
    backend,
    gateway.clone(),
  );
  Harness {
    state,
    items,
    blobs,
    gateway,
  }
}

pub fn watch(name: &str, brand: &str, price: f64) -> ItemFields {
  ItemFields {
    name: name.to_string(),
    brand: brand.to_string(),
    price,
    ..Default::default()
  }
}

/// Creates each item in turn, oldest first, with distinct creation times.
pub async fn create_all(state: &AppState, fields: Vec<ItemFields>) -> Vec<Item> {
  let mut created = Vec::new();
  for f in fields {
    created.push(state.catalog.create(f).await.expect("create succeeds"));
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  }
  created
}
