// vitrine/src/catalog/seed.rs

use crate::catalog::repository::CatalogRepository;
use crate::errors::Result as AppResult;
use crate::models::ItemFields;
use tracing::{info, instrument};

fn demo_watch(name: &str, brand: &str, price: f64, description: &str, featured: bool, new_arrival: bool) -> ItemFields {
  ItemFields {
    name: name.to_string(),
    brand: brand.to_string(),
    price,
    description: description.to_string(),
    featured,
    new_arrival,
    ..Default::default()
  }
}

/// Fills an empty catalog with a handful of listings. Returns how many were added.
#[instrument(name = "catalog::seed_demo_catalog", skip(repository))]
pub async fn seed_demo_catalog(repository: &CatalogRepository) -> AppResult<usize> {
  if !repository.list().await?.is_empty() {
    info!("Catalog already has items; skipping demo seed.");
    return Ok(0);
  }

  let demo = [
    demo_watch("Submariner Date 126610LN", "Rolex", 13_950.0, "2022, full set, unpolished.", true, false),
    demo_watch("Speedmaster Professional", "Omega", 6_400.0, "Hesalite, 2021 card.", true, true),
    demo_watch("Royal Oak 15500ST", "Audemars Piguet", 41_000.0, "Blue dial, box and papers.", false, true),
    demo_watch("Calatrava 5227G", "Patek Philippe", 29_500.0, "White gold, officer caseback.", true, false),
  ];
  let count = demo.len();
  for fields in demo {
    repository.create(fields).await?;
  }
  info!(count, "Seeded demo catalog.");
  Ok(count)
}
