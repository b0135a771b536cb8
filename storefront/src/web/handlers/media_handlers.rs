// vitrine/src/web/handlers/media_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::services::blob_store::BlobKey;
use crate::state::AppState;

#[instrument(name = "handler::serve_media", skip(app_state, path), fields(key = %path.as_ref()))]
pub async fn serve_media_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let not_found = || AppError::NotFound("No such media.".to_string());
  let key = BlobKey::parse(&path.into_inner()).ok_or_else(not_found)?;
  let blob = app_state.catalog.blobs().get(&key).await?.ok_or_else(not_found)?;
  Ok(
    HttpResponse::Ok()
      .content_type(blob.content_type)
      // Keys are write-once.
      .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
      .body(blob.bytes),
  )
}
