// vitrine/src/models/item.rs

use crate::errors::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
  pub fn generate() -> Self {
    ItemId(Uuid::new_v4())
  }

  /// Any string that is not a UUID names no item.
  pub fn parse(raw: &str) -> Option<Self> {
    Uuid::parse_str(raw.trim()).ok().map(ItemId)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for ItemId {
  fn from(id: Uuid) -> Self {
    ItemId(id)
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// The two shapes a stored record's images come in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemImages {
  /// Written before multi-image support: one URL, no sequence.
  Legacy(String),
  Gallery(Vec<String>),
}

impl ItemImages {
  pub fn from_stored(image_url: Option<String>, image_urls: Option<Vec<String>>) -> Self {
    match image_urls {
      Some(urls) if urls.iter().any(|u| !u.is_empty()) => ItemImages::Gallery(urls),
      _ => ItemImages::Legacy(image_url.unwrap_or_default()),
    }
  }

  /// The one ordered sequence; index 0 is the main image.
  pub fn into_urls(self) -> Vec<String> {
    match self {
      ItemImages::Legacy(url) if url.is_empty() => Vec::new(),
      ItemImages::Legacy(url) => vec![url],
      ItemImages::Gallery(urls) => urls.into_iter().filter(|u| !u.is_empty()).collect(),
    }
  }
}

/// A watch listed in the catalog.
///
/// Serializes with both `imageUrl` and `imageUrls`, derived from the single
/// `image_urls` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ItemDocument", from = "ItemDocument")]
pub struct Item {
  pub id: ItemId,
  pub name: String,
  pub brand: String,
  pub price: f64,
  pub description: String,
  pub image_urls: Vec<String>,
  pub sold: bool,
  pub featured: bool,
  pub new_arrival: bool,
  pub created_at: DateTime<Utc>,
}

impl Item {
  pub fn from_fields(id: ItemId, fields: ItemFields, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      name: fields.name,
      brand: fields.brand,
      price: fields.price,
      description: fields.description,
      image_urls: ItemImages::Gallery(fields.image_urls).into_urls(),
      sold: fields.sold,
      featured: fields.featured,
      new_arrival: fields.new_arrival,
      created_at,
    }
  }

  /// Legacy single-image mirror, `""` when there are no images.
  pub fn image_url(&self) -> &str {
    self.image_urls.first().map(String::as_str).unwrap_or("")
  }

  pub fn fields(&self) -> ItemFields {
    ItemFields {
      name: self.name.clone(),
      brand: self.brand.clone(),
      price: self.price,
      description: self.description.clone(),
      image_urls: self.image_urls.clone(),
      sold: self.sold,
      featured: self.featured,
      new_arrival: self.new_arrival,
    }
  }

  pub fn is_available(&self) -> bool {
    !self.sold
  }
}

/// Wire and document shape of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
  pub id: ItemId,
  pub name: String,
  #[serde(default)]
  pub brand: String,
  pub price: f64,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub image_urls: Option<Vec<String>>,
  #[serde(default)]
  pub sold: bool,
  #[serde(default)]
  pub featured: bool,
  #[serde(default)]
  pub new_arrival: bool,
  pub created_at: DateTime<Utc>,
}

impl From<Item> for ItemDocument {
  fn from(item: Item) -> Self {
    Self {
      id: item.id,
      image_url: Some(item.image_url().to_string()),
      name: item.name,
      brand: item.brand,
      price: item.price,
      description: item.description,
      image_urls: Some(item.image_urls),
      sold: item.sold,
      featured: item.featured,
      new_arrival: item.new_arrival,
      created_at: item.created_at,
    }
  }
}

impl From<ItemDocument> for Item {
  fn from(doc: ItemDocument) -> Self {
    Self {
      id: doc.id,
      name: doc.name,
      brand: doc.brand,
      price: doc.price,
      description: doc.description,
      image_urls: ItemImages::from_stored(doc.image_url, doc.image_urls).into_urls(),
      sold: doc.sold,
      featured: doc.featured,
      new_arrival: doc.new_arrival,
      created_at: doc.created_at,
    }
  }
}

/// Every admin-mutable field of an item. Submitting these replaces the item's
/// fields wholesale; an omitted optional field reverts to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
  pub name: String,
  #[serde(default)]
  pub brand: String,
  pub price: f64,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub image_urls: Vec<String>,
  #[serde(default)]
  pub sold: bool,
  #[serde(default)]
  pub featured: bool,
  #[serde(default)]
  pub new_arrival: bool,
}

impl ItemFields {
  /// Trims `name` and `brand`. Stored brands compare exactly against the
  /// trimmed filter query.
  pub fn normalized(mut self) -> Self {
    self.name = self.name.trim().to_string();
    self.brand = self.brand.trim().to_string();
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(AppError::validation("name", "Name is required."));
    }
    if !self.price.is_finite() || self.price < 0.0 {
      return Err(AppError::validation("price", "Price must be a non-negative number."));
    }
    Ok(())
  }
}
