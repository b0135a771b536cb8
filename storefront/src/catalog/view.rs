// vitrine/src/catalog/view.rs

//! Read-only projections of the catalog for the public pages.

use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, ItemId};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

pub const FEATURED_LIMIT: usize = 3;
pub const NEW_ARRIVALS_LIMIT: usize = 4;

const ALL_BRANDS: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandFilter {
  All,
  Brand(String),
}

impl BrandFilter {
  /// A missing, blank or `All` query selects everything.
  pub fn from_query(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      None | Some("") | Some(ALL_BRANDS) => BrandFilter::All,
      Some(brand) => BrandFilter::Brand(brand.to_string()),
    }
  }

  pub fn label(&self) -> &str {
    match self {
      BrandFilter::All => ALL_BRANDS,
      BrandFilter::Brand(brand) => brand,
    }
  }

  pub fn matches(&self, item: &Item) -> bool {
    match self {
      BrandFilter::All => true,
      BrandFilter::Brand(brand) => item.brand == *brand,
    }
  }
}

impl Serialize for BrandFilter {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.label())
  }
}

/// One listing snapshot, newest first. Built per request; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
  items: Vec<Item>,
}

impl CatalogView {
  pub fn new(items: Vec<Item>) -> Self {
    Self { items }
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  /// `All` followed by every distinct non-empty brand, alphabetically.
  pub fn brand_options(&self) -> Vec<BrandFilter> {
    let brands: BTreeSet<&str> = self
      .items
      .iter()
      .map(|item| item.brand.as_str())
      .filter(|brand| !brand.trim().is_empty())
      .collect();
    std::iter::once(BrandFilter::All)
      .chain(brands.into_iter().map(|b| BrandFilter::Brand(b.to_string())))
      .collect()
  }

  pub fn filtered(&self, filter: &BrandFilter) -> Vec<&Item> {
    self.items.iter().filter(|item| filter.matches(item)).collect()
  }

  pub fn featured(&self) -> Vec<&Item> {
    self
      .items
      .iter()
      .filter(|item| item.featured && item.is_available())
      .take(FEATURED_LIMIT)
      .collect()
  }

  pub fn new_arrivals(&self) -> Vec<&Item> {
    self
      .items
      .iter()
      .filter(|item| item.new_arrival && item.is_available())
      .take(NEW_ARRIVALS_LIMIT)
      .collect()
  }

  pub fn detail(&self, id: ItemId) -> AppResult<&Item> {
    self
      .items
      .iter()
      .find(|item| item.id == id)
      .ok_or_else(|| AppError::NotFound(format!("Watch {} not found.", id)))
  }
}
