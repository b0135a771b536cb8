// vitrine/src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::admin::session::AdminSession;
use crate::errors::AppError;
use crate::models::{ItemFields, ItemId};
use crate::pipelines::delete_item_pipeline::run_delete_item;
use crate::pipelines::save_item_pipeline::{run_save_item, SaveOutcome};
use crate::state::AppState;
use crate::web::handlers::catalog_handlers::parse_item_id;

#[derive(Deserialize, Debug)]
pub struct DeleteItemQuery {
  #[serde(default)]
  pub confirm: bool,
}

/// Saved item plus the re-listed inventory. `refreshError` is set when the
/// save went through but the re-list did not.
fn saved_body(outcome: SaveOutcome) -> serde_json::Value {
  json!({
      "item": outcome.saved,
      "inventory": outcome.inventory,
      "refreshError": outcome.refresh_error,
  })
}

#[instrument(name = "handler::admin_inventory", skip(app_state, _session))]
pub async fn list_inventory_handler(
  app_state: web::Data<AppState>,
  _session: AdminSession,
) -> Result<HttpResponse, AppError> {
  let items = app_state.catalog.list().await?;
  Ok(HttpResponse::Ok().json(json!({ "items": items })))
}

#[instrument(name = "handler::create_item", skip_all, fields(name = %req_payload.name))]
pub async fn create_item_handler(
  app_state: web::Data<AppState>,
  _session: AdminSession,
  req_payload: web::Json<ItemFields>,
) -> Result<HttpResponse, AppError> {
  // No target: the pipeline creates.
  let outcome = run_save_item(&app_state, None, req_payload.into_inner()).await?;
  info!(item_id = %outcome.saved.id, "Watch added.");
  Ok(HttpResponse::Created().json(saved_body(outcome)))
}

#[instrument(name = "handler::update_item", skip_all, fields(item_id = %path.as_ref()))]
pub async fn update_item_handler(
  app_state: web::Data<AppState>,
  _session: AdminSession,
  path: web::Path<String>,
  req_payload: web::Json<ItemFields>,
) -> Result<HttpResponse, AppError> {
  let item_id = parse_item_id(&path.into_inner())?;
  let outcome = run_save_item(&app_state, Some(item_id), req_payload.into_inner()).await?;
  info!("Watch updated.");
  Ok(HttpResponse::Ok().json(saved_body(outcome)))
}

#[instrument(name = "handler::delete_item", skip_all, fields(item_id = %path.as_ref(), confirm = query.confirm))]
pub async fn delete_item_handler(
  app_state: web::Data<AppState>,
  _session: AdminSession,
  path: web::Path<String>,
  query: web::Query<DeleteItemQuery>,
) -> Result<HttpResponse, AppError> {
  let unconfirmed = || AppError::ConfirmationRequired("Deleting a watch needs confirm=true.".to_string());
  let raw_id = path.into_inner();
  // A malformed id names nothing, so there is nothing left to delete.
  let Some(item_id) = ItemId::parse(&raw_id) else {
    if !query.confirm {
      return Err(unconfirmed());
    }
    return Ok(HttpResponse::Ok().json(json!({ "deleted": true, "id": raw_id })));
  };
  // The pipeline stops at the confirmation step when `confirm` is false.
  if !run_delete_item(&app_state, item_id, query.confirm).await? {
    return Err(unconfirmed());
  }
  Ok(HttpResponse::Ok().json(json!({ "deleted": true, "id": item_id })))
}

#[instrument(name = "handler::upload_image", skip_all, fields(filename = %path.as_ref(), size = body.len()))]
pub async fn upload_image_handler(
  app_state: web::Data<AppState>,
  _session: AdminSession,
  path: web::Path<String>,
  body: web::Bytes,
) -> Result<HttpResponse, AppError> {
  // Raw request body is the image; the path segment is its filename.
  let url = app_state.catalog.upload_image(&path.into_inner(), body.to_vec()).await?;
  Ok(HttpResponse::Created().json(json!({ "url": url })))
}
