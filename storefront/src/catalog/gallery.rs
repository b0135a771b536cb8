// vitrine/src/catalog/gallery.rs

use crate::models::{Item, ItemImages};
use serde::Serialize;

/// Position within an item's images. Moves wrap around; with one image or
/// none, moves do nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCursor {
  images: Vec<String>,
  index: usize,
}

impl GalleryCursor {
  pub fn new(images: ItemImages) -> Self {
    Self {
      images: images.into_urls(),
      index: 0,
    }
  }

  pub fn for_item(item: &Item) -> Self {
    Self::new(ItemImages::Gallery(item.image_urls.clone()))
  }

  /// Starts at `index`, taken modulo the number of images.
  pub fn starting_at(mut self, index: usize) -> Self {
    self.index = if self.images.is_empty() { 0 } else { index % self.images.len() };
    self
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn len(&self) -> usize {
    self.images.len()
  }

  pub fn is_empty(&self) -> bool {
    self.images.is_empty()
  }

  pub fn can_navigate(&self) -> bool {
    self.images.len() > 1
  }

  pub fn current(&self) -> Option<&str> {
    self.images.get(self.index).map(String::as_str)
  }

  pub fn next(&mut self) -> usize {
    if self.can_navigate() {
      self.index = (self.index + 1) % self.images.len();
    }
    self.index
  }

  pub fn previous(&mut self) -> usize {
    if self.can_navigate() {
      self.index = (self.index + self.images.len() - 1) % self.images.len();
    }
    self.index
  }

  pub fn state(&self) -> GalleryState {
    let mut ahead = self.clone();
    let mut behind = self.clone();
    GalleryState {
      index: self.index,
      total: self.images.len(),
      current: self.current().map(str::to_string),
      can_navigate: self.can_navigate(),
      next_index: ahead.next(),
      previous_index: behind.previous(),
      images: self.images.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryState {
  pub index: usize,
  pub total: usize,
  pub current: Option<String>,
  pub can_navigate: bool,
  pub next_index: usize,
  pub previous_index: usize,
  pub images: Vec<String>,
}
