// vitrine/src/admin/form.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, ItemFields};

/// The admin panel's editable buffer. `price` is kept as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
  pub name: String,
  pub brand: String,
  pub price: String,
  pub description: String,
  pub image_urls: Vec<String>,
  pub sold: bool,
  pub featured: bool,
  pub new_arrival: bool,
}

impl ItemForm {
  pub fn from_item(item: &Item) -> Self {
    Self {
      name: item.name.clone(),
      brand: item.brand.clone(),
      price: item.price.to_string(),
      description: item.description.clone(),
      image_urls: item.image_urls.clone(),
      sold: item.sold,
      featured: item.featured,
      new_arrival: item.new_arrival,
    }
  }

  pub fn main_image(&self) -> Option<&str> {
    self.image_urls.first().map(String::as_str)
  }

  /// Drops image `index`; later images shift down by one. Out of range is a no-op.
  pub fn remove_image(&mut self, index: usize) -> Option<String> {
    if index < self.image_urls.len() {
      Some(self.image_urls.remove(index))
    } else {
      None
    }
  }

  /// Parses and validates the buffer into the fields a save writes.
  pub fn to_fields(&self) -> AppResult<ItemFields> {
    if self.name.trim().is_empty() {
      return Err(AppError::validation("name", "Name is required."));
    }
    let raw_price = self.price.trim();
    if raw_price.is_empty() {
      return Err(AppError::validation("price", "Price is required."));
    }
    let price: f64 = raw_price
      .parse()
      .map_err(|_| AppError::validation("price", "Price must be a number."))?;

    let fields = ItemFields {
      name: self.name.trim().to_string(),
      brand: self.brand.trim().to_string(),
      price,
      description: self.description.clone(),
      image_urls: self.image_urls.clone(),
      sold: self.sold,
      featured: self.featured,
      new_arrival: self.new_arrival,
    };
    fields.validate()?;
    Ok(fields)
  }
}
