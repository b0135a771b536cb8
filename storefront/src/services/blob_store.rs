// vitrine/src/services/blob_store.rs

//! Write-once storage for image bytes. Objects are never transformed or deleted.

use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, instrument};
use uuid::Uuid;

const KEY_PREFIX: &str = "watches";

/// `watches/<epoch-ms>-<tag>-<filename>`, where `tag` is eight random hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
  /// Two uploads of the same filename in the same millisecond still get
  /// distinct keys.
  pub fn for_upload(filename: &str, at: DateTime<Utc>) -> Self {
    let tag = Uuid::new_v4().simple().to_string();
    BlobKey(format!(
      "{}/{}-{}-{}",
      KEY_PREFIX,
      at.timestamp_millis(),
      &tag[..8],
      sanitize_filename(filename)
    ))
  }

  /// Accepts a key from a request path. Rejects anything that could escape the
  /// `watches/` namespace.
  pub fn parse(raw: &str) -> Option<Self> {
    let rest = raw.strip_prefix(KEY_PREFIX)?.strip_prefix('/')?;
    if rest.is_empty() || rest.contains('/') || rest.contains('\\') || rest.starts_with('.') {
      return None;
    }
    Some(BlobKey(raw.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Keeps ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
  let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
  let cleaned: String = base
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
    .collect();
  let cleaned = cleaned.trim_start_matches('.').to_string();
  if cleaned.is_empty() {
    "image".to_string()
  } else {
    cleaned
  }
}

pub fn content_type_for(key: &str) -> &'static str {
  let ext = key.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
  match ext.as_str() {
    "jpg" | "jpeg" => "image/jpeg",
    "png" => "image/png",
    "webp" => "image/webp",
    "gif" => "image/gif",
    "avif" => "image/avif",
    "heic" => "image/heic",
    _ => "application/octet-stream",
  }
}

#[derive(Debug, Clone)]
pub struct Blob {
  pub bytes: Vec<u8>,
  pub content_type: &'static str,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
  /// Stores `bytes` under `key` and returns the object's public URL. Fails if
  /// the key is already taken.
  async fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> AppResult<String>;

  async fn get(&self, key: &BlobKey) -> AppResult<Option<Blob>>;
}

fn public_url(base_url: &str, key: &BlobKey) -> String {
  format!("{}/media/{}", base_url.trim_end_matches('/'), key.as_str())
}

pub struct MemoryBlobStore {
  base_url: String,
  objects: RwLock<HashMap<BlobKey, Vec<u8>>>,
}

impl MemoryBlobStore {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      objects: RwLock::new(HashMap::new()),
    }
  }

  pub fn len(&self) -> usize {
    self.objects.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.read().is_empty()
  }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
  #[instrument(name = "memory_blobs::put", skip(self, bytes), fields(key = %key.as_str(), size = bytes.len()))]
  async fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> AppResult<String> {
    let mut objects = self.objects.write();
    if objects.contains_key(key) {
      return Err(AppError::UploadFailed(format!("Key '{}' already exists", key.as_str())));
    }
    objects.insert(key.clone(), bytes);
    Ok(public_url(&self.base_url, key))
  }

  async fn get(&self, key: &BlobKey) -> AppResult<Option<Blob>> {
    Ok(self.objects.read().get(key).map(|bytes| Blob {
      bytes: bytes.clone(),
      content_type: content_type_for(key.as_str()),
    }))
  }
}

/// Blobs as files under a media directory, `<root>/watches/<epoch-ms>-<tag>-<filename>`.
pub struct LocalBlobStore {
  root: PathBuf,
  base_url: String,
}

impl LocalBlobStore {
  pub async fn open(root: impl Into<PathBuf>, base_url: impl Into<String>) -> AppResult<Self> {
    let root = root.into();
    tokio::fs::create_dir_all(root.join(KEY_PREFIX)).await.map_err(|e| {
      error!(error = %e, root = %root.display(), "Could not create media directory.");
      AppError::Config(format!("MEDIA_DIR '{}' is not usable: {}", root.display(), e))
    })?;
    Ok(Self {
      root,
      base_url: base_url.into(),
    })
  }

  fn path_for(&self, key: &BlobKey) -> AppResult<PathBuf> {
    let relative = Path::new(key.as_str());
    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
      return Err(AppError::validation("key", "Invalid media key."));
    }
    Ok(self.root.join(relative))
  }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
  #[instrument(name = "local_blobs::put", skip(self, bytes), fields(key = %key.as_str(), size = bytes.len()))]
  async fn put(&self, key: &BlobKey, bytes: Vec<u8>) -> AppResult<String> {
    let path = self.path_for(key)?;
    let mut file = tokio::fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&path)
      .await
      .map_err(|e| {
        error!(error = %e, "Could not create blob file.");
        AppError::UploadFailed(e.to_string())
      })?;
    file.write_all(&bytes).await.map_err(|e| AppError::UploadFailed(e.to_string()))?;
    file.flush().await.map_err(|e| AppError::UploadFailed(e.to_string()))?;
    debug!(path = %path.display(), "Blob written.");
    Ok(public_url(&self.base_url, key))
  }

  async fn get(&self, key: &BlobKey) -> AppResult<Option<Blob>> {
    let path = self.path_for(key)?;
    match tokio::fs::read(&path).await {
      Ok(bytes) => Ok(Some(Blob {
        bytes,
        content_type: content_type_for(key.as_str()),
      })),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(AppError::Internal(format!("Reading blob failed: {}", e))),
    }
  }
}
