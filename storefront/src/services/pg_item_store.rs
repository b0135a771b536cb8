// vitrine/src/services/pg_item_store.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, ItemFields, ItemId, ItemImages};
use crate::services::item_store::ItemStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, instrument};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
  "SELECT id, name, brand, price, description, image_url, image_urls, sold, featured, new_arrival, created_at FROM watches";

/// One row of `watches`. A null `image_urls` marks a record written before
/// multi-image support.
#[derive(Debug, FromRow)]
struct WatchRow {
  id: Uuid,
  name: String,
  brand: String,
  price: f64,
  description: String,
  image_url: Option<String>,
  image_urls: Option<Vec<String>>,
  sold: bool,
  featured: bool,
  new_arrival: bool,
  created_at: DateTime<Utc>,
}

impl From<WatchRow> for Item {
  fn from(row: WatchRow) -> Self {
    Item {
      id: ItemId::from(row.id),
      name: row.name,
      brand: row.brand,
      price: row.price,
      description: row.description,
      image_urls: ItemImages::from_stored(row.image_url, row.image_urls).into_urls(),
      sold: row.sold,
      featured: row.featured,
      new_arrival: row.new_arrival,
      created_at: row.created_at,
    }
  }
}

#[derive(Clone)]
pub struct PgItemStore {
  pool: PgPool,
}

impl PgItemStore {
  pub async fn connect(database_url: &str) -> AppResult<Self> {
    let pool = PgPool::connect(database_url).await.map_err(|e| {
      error!(error = %e, "Failed to connect to the database.");
      AppError::StoreUnavailable(e.to_string())
    })?;
    info!("Successfully connected to the database.");
    Ok(Self { pool })
  }

  pub fn from_pool(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the `watches` table and its listing index when missing.
  #[instrument(name = "pg_store::ensure_schema", skip(self), err(Display))]
  pub async fn ensure_schema(&self) -> AppResult<()> {
    sqlx::query(
      "CREATE TABLE IF NOT EXISTS watches (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        brand TEXT NOT NULL DEFAULT '',
        price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
        description TEXT NOT NULL DEFAULT '',
        image_url TEXT,
        image_urls TEXT[],
        sold BOOLEAN NOT NULL DEFAULT FALSE,
        featured BOOLEAN NOT NULL DEFAULT FALSE,
        new_arrival BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL
      )",
    )
    .execute(&self.pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS watches_created_at_idx ON watches (created_at DESC)")
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[async_trait]
impl ItemStore for PgItemStore {
  #[instrument(name = "pg_store::list", skip(self), err(Display))]
  async fn list(&self) -> AppResult<Vec<Item>> {
    let rows: Vec<WatchRow> = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))
      .fetch_all(&self.pool)
      .await?;
    Ok(rows.into_iter().map(Item::from).collect())
  }

  #[instrument(name = "pg_store::get", skip(self), fields(item_id = %id), err(Display))]
  async fn get(&self, id: ItemId) -> AppResult<Option<Item>> {
    let row: Option<WatchRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(Item::from))
  }

  #[instrument(name = "pg_store::insert", skip_all, fields(name = %fields.name), err(Display))]
  async fn insert(&self, fields: ItemFields, created_at: DateTime<Utc>) -> AppResult<Item> {
    let item = Item::from_fields(ItemId::generate(), fields, created_at);
    sqlx::query(
      "INSERT INTO watches (id, name, brand, price, description, image_url, image_urls, sold, featured, new_arrival, created_at)
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(item.id.as_uuid())
    .bind(&item.name)
    .bind(&item.brand)
    .bind(item.price)
    .bind(&item.description)
    .bind(item.image_url())
    .bind(&item.image_urls)
    .bind(item.sold)
    .bind(item.featured)
    .bind(item.new_arrival)
    .bind(item.created_at)
    .execute(&self.pool)
    .await?;
    Ok(item)
  }

  #[instrument(name = "pg_store::replace", skip(self, item), fields(item_id = %item.id), err(Display))]
  async fn replace(&self, item: &Item) -> AppResult<bool> {
    let result = sqlx::query(
      "UPDATE watches SET name = $2, brand = $3, price = $4, description = $5, image_url = $6, image_urls = $7,
         sold = $8, featured = $9, new_arrival = $10, created_at = $11
       WHERE id = $1",
    )
    .bind(item.id.as_uuid())
    .bind(&item.name)
    .bind(&item.brand)
    .bind(item.price)
    .bind(&item.description)
    .bind(item.image_url())
    .bind(&item.image_urls)
    .bind(item.sold)
    .bind(item.featured)
    .bind(item.new_arrival)
    .bind(item.created_at)
    .execute(&self.pool)
    .await?;
    Ok(result.rows_affected() > 0)
  }

  #[instrument(name = "pg_store::remove", skip(self), fields(item_id = %id), err(Display))]
  async fn remove(&self, id: ItemId) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM watches WHERE id = $1")
      .bind(id.as_uuid())
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }
}
