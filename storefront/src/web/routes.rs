// vitrine/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{admin_handlers, auth_handlers, catalog_handlers, checkout_handlers, media_handlers};

/// Largest accepted image upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::validation("body", err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req| AppError::validation("query", err.to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .app_data(query_config())
    .route("/api/v1/health", web::get().to(health_check_handler))
    .service(
      web::scope("/api")
        .service(
          web::scope("/items")
            .route("", web::get().to(catalog_handlers::list_items_handler))
            .route("/featured", web::get().to(catalog_handlers::featured_items_handler))
            .route("/new-arrivals", web::get().to(catalog_handlers::new_arrivals_handler))
            .route("/{item_id}", web::get().to(catalog_handlers::get_item_handler))
            .route("/{item_id}/gallery", web::get().to(catalog_handlers::gallery_handler)),
        )
        .route("/brands", web::get().to(catalog_handlers::brands_handler))
        .service(
          web::scope("/auth")
            .route("", web::post().to(auth_handlers::login_handler))
            .route("/logout", web::post().to(auth_handlers::logout_handler)),
        )
        .service(
          web::scope("/admin")
            .route("/items", web::get().to(admin_handlers::list_inventory_handler))
            .route("/items", web::post().to(admin_handlers::create_item_handler))
            .route("/items/{item_id}", web::put().to(admin_handlers::update_item_handler))
            .route("/items/{item_id}", web::delete().to(admin_handlers::delete_item_handler))
            .service(
              web::resource("/uploads/{filename}")
                .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
                .route(web::post().to(admin_handlers::upload_image_handler)),
            ),
        )
        .route("/checkout", web::post().to(checkout_handlers::start_checkout_handler)),
    )
    .route("/media/{key:.*}", web::get().to(media_handlers::serve_media_handler))
    .route(
      "/mock-pay/session/{session_id}",
      web::get().to(checkout_handlers::mock_payment_session_handler),
    )
    .route("/success", web::get().to(checkout_handlers::checkout_success_handler));
}
