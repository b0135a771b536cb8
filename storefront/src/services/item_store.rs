// vitrine/src/services/item_store.rs

//! Keyed persistence for items. Two backends: PostgreSQL (`pg_item_store`) and
//! the in-memory store below.

use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, ItemFields, ItemId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, instrument};

pub const COLLECTION: &str = "watches";

#[async_trait]
pub trait ItemStore: Send + Sync {
  /// Every item, newest `created_at` first.
  async fn list(&self) -> AppResult<Vec<Item>>;

  async fn get(&self, id: ItemId) -> AppResult<Option<Item>>;

  /// Stores a new item under a freshly generated id.
  async fn insert(&self, fields: ItemFields, created_at: DateTime<Utc>) -> AppResult<Item>;

  /// Overwrites the stored item with the same id. `false` when no such item exists.
  async fn replace(&self, item: &Item) -> AppResult<bool>;

  /// `false` when no such item existed.
  async fn remove(&self, id: ItemId) -> AppResult<bool>;
}

pub fn sort_newest_first(items: &mut [Item]) {
  items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Default)]
pub struct MemoryItemStore {
  items: RwLock<HashMap<ItemId, Item>>,
  offline: AtomicBool,
  writes: AtomicUsize,
}

impl MemoryItemStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes every call fail with `StoreUnavailable` until switched back.
  pub fn set_offline(&self, offline: bool) {
    self.offline.store(offline, Ordering::SeqCst);
  }

  /// Number of accepted insert/replace/remove calls.
  pub fn write_count(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  fn ensure_online(&self) -> AppResult<()> {
    if self.offline.load(Ordering::SeqCst) {
      return Err(AppError::StoreUnavailable(format!("{} collection is offline", COLLECTION)));
    }
    Ok(())
  }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
  #[instrument(name = "memory_store::list", skip(self))]
  async fn list(&self) -> AppResult<Vec<Item>> {
    self.ensure_online()?;
    let mut items: Vec<Item> = self.items.read().values().cloned().collect();
    sort_newest_first(&mut items);
    Ok(items)
  }

  async fn get(&self, id: ItemId) -> AppResult<Option<Item>> {
    self.ensure_online()?;
    Ok(self.items.read().get(&id).cloned())
  }

  #[instrument(name = "memory_store::insert", skip_all, fields(name = %fields.name))]
  async fn insert(&self, fields: ItemFields, created_at: DateTime<Utc>) -> AppResult<Item> {
    self.ensure_online()?;
    let item = Item::from_fields(ItemId::generate(), fields, created_at);
    self.items.write().insert(item.id, item.clone());
    self.writes.fetch_add(1, Ordering::SeqCst);
    debug!(item_id = %item.id, "Item inserted.");
    Ok(item)
  }

  async fn replace(&self, item: &Item) -> AppResult<bool> {
    self.ensure_online()?;
    let mut items = self.items.write();
    match items.get_mut(&item.id) {
      Some(slot) => {
        *slot = item.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn remove(&self, id: ItemId) -> AppResult<bool> {
    self.ensure_online()?;
    let removed = self.items.write().remove(&id).is_some();
    self.writes.fetch_add(1, Ordering::SeqCst);
    Ok(removed)
  }
}
