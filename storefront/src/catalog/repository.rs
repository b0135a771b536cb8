// vitrine/src/catalog/repository.rs

//! Item-level operations over the item store and the blob store.

use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, ItemFields, ItemId};
use crate::services::blob_store::{BlobKey, BlobStore};
use crate::services::item_store::{sort_newest_first, ItemStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub struct CatalogRepository {
  items: Arc<dyn ItemStore>,
  blobs: Arc<dyn BlobStore>,
}

impl CatalogRepository {
  pub fn new(items: Arc<dyn ItemStore>, blobs: Arc<dyn BlobStore>) -> Self {
    Self { items, blobs }
  }

  pub fn blobs(&self) -> &Arc<dyn BlobStore> {
    &self.blobs
  }

  #[instrument(name = "catalog::list", skip(self), err(Display))]
  pub async fn list(&self) -> AppResult<Vec<Item>> {
    let mut items = self.items.list().await.map_err(|e| {
      error!(error = %e, "Listing items failed.");
      e
    })?;
    sort_newest_first(&mut items);
    Ok(items)
  }

  #[instrument(name = "catalog::get", skip(self), fields(item_id = %id))]
  pub async fn get(&self, id: ItemId) -> AppResult<Item> {
    self
      .items
      .get(id)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("Watch {} not found.", id)))
  }

  /// Normalizes and validates, then stores a new item stamped with the current time.
  #[instrument(name = "catalog::create", skip_all, fields(name = %fields.name))]
  pub async fn create(&self, fields: ItemFields) -> AppResult<Item> {
    let fields = fields.normalized();
    fields.validate()?;
    let item = self.items.insert(fields, Utc::now()).await?;
    info!(item_id = %item.id, "Watch created.");
    Ok(item)
  }

  /// Replaces every mutable field; `created_at` is carried over from the stored item.
  #[instrument(name = "catalog::update", skip_all, fields(item_id = %id))]
  pub async fn update(&self, id: ItemId, fields: ItemFields) -> AppResult<Item> {
    let fields = fields.normalized();
    fields.validate()?;
    let existing = self.get(id).await?;
    let item = Item::from_fields(id, fields, existing.created_at);
    if !self.items.replace(&item).await? {
      warn!("Watch vanished between read and write.");
      return Err(AppError::NotFound(format!("Watch {} not found.", id)));
    }
    info!("Watch updated.");
    Ok(item)
  }

  /// Deleting an id that is already gone succeeds.
  #[instrument(name = "catalog::delete", skip(self), fields(item_id = %id))]
  pub async fn delete(&self, id: ItemId) -> AppResult<()> {
    if self.items.remove(id).await? {
      info!("Watch deleted.");
    } else {
      info!("Watch was already absent.");
    }
    Ok(())
  }

  /// Stores the bytes under a fresh `watches/` key and returns the public URL.
  #[instrument(name = "catalog::upload_image", skip(self, bytes), fields(size = bytes.len()))]
  pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> AppResult<String> {
    if filename.trim().is_empty() {
      return Err(AppError::validation("filename", "A file name is required."));
    }
    if bytes.is_empty() {
      return Err(AppError::validation("file", "The image is empty."));
    }
    // Fresh tagged key, so a put never lands on an existing object.
    let key = BlobKey::for_upload(filename, Utc::now());
    let url = self.blobs.put(&key, bytes).await.map_err(|e| match e {
      AppError::UploadFailed(_) => e,
      other => AppError::UploadFailed(other.to_string()),
    })?;
    info!(key = %key.as_str(), "Image uploaded.");
    Ok(url)
  }
}
