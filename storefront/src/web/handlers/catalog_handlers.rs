// vitrine/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::catalog::{BrandFilter, CatalogView, GalleryCursor};
use crate::errors::AppError;
use crate::models::ItemId;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListItemsQuery {
  pub brand: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GalleryStep {
  Next,
  Previous,
}

#[derive(Deserialize, Debug)]
pub struct GalleryQuery {
  pub index: Option<usize>,
  pub step: Option<GalleryStep>,
}

/// One store read per request; every derived list comes from this snapshot.
async fn load_view(app_state: &AppState) -> Result<CatalogView, AppError> {
  Ok(CatalogView::new(app_state.catalog.list().await?))
}

pub(crate) fn parse_item_id(raw: &str) -> Result<ItemId, AppError> {
  ItemId::parse(raw).ok_or_else(|| AppError::NotFound(format!("Watch {} not found.", raw)))
}

#[instrument(name = "handler::list_items", skip(app_state, query), fields(brand = ?query.brand))]
pub async fn list_items_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListItemsQuery>,
) -> Result<HttpResponse, AppError> {
  let view = load_view(&app_state).await?;
  let filter = BrandFilter::from_query(query.brand.as_deref());
  let items = view.filtered(&filter);
  info!(count = items.len(), "Listed items.");
  Ok(HttpResponse::Ok().json(json!({
      "brand": filter,
      "items": items,
  })))
}

#[instrument(name = "handler::featured_items", skip(app_state))]
pub async fn featured_items_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let view = load_view(&app_state).await?;
  Ok(HttpResponse::Ok().json(json!({ "items": view.featured() })))
}

#[instrument(name = "handler::new_arrivals", skip(app_state))]
pub async fn new_arrivals_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let view = load_view(&app_state).await?;
  Ok(HttpResponse::Ok().json(json!({ "items": view.new_arrivals() })))
}

#[instrument(name = "handler::brands", skip(app_state))]
pub async fn brands_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let view = load_view(&app_state).await?;
  Ok(HttpResponse::Ok().json(json!({ "brands": view.brand_options() })))
}

#[instrument(name = "handler::get_item", skip(app_state, path), fields(item_id = %path.as_ref()))]
pub async fn get_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let item_id = parse_item_id(&path.into_inner())?;
  // Same per-request projection as the listing pages.
  let view = load_view(&app_state).await?;
  let item = view.detail(item_id)?;
  Ok(HttpResponse::Ok().json(json!({ "item": item })))
}

/// Cursor state at `index`, optionally after one step.
#[instrument(name = "handler::gallery", skip(app_state, path, query), fields(item_id = %path.as_ref()))]
pub async fn gallery_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<GalleryQuery>,
) -> Result<HttpResponse, AppError> {
  let item_id = parse_item_id(&path.into_inner())?;
  let item = app_state.catalog.get(item_id).await?;

  // Out-of-range starting indexes wrap.
  let mut cursor = GalleryCursor::for_item(&item).starting_at(query.index.unwrap_or(0));
  match query.step {
    Some(GalleryStep::Next) => {
      cursor.next();
    }
    Some(GalleryStep::Previous) => {
      cursor.previous();
    }
    None => {}
  }
  Ok(HttpResponse::Ok().json(cursor.state()))
}
