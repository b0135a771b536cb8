// tests/http_api_tests.rs
mod common;

use actix_web::{http::header, http::StatusCode, test, web, App};
use common::*;
use serde_json::{json, Value};
use serial_test::serial;
use vitrine::web::configure_app_routes;

macro_rules! app {
  ($h:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($h.state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

fn bearer(token: &str) -> (header::HeaderName, String) {
  (header::AUTHORIZATION, format!("Bearer {}", token))
}

fn admin_token(h: &Harness) -> String {
  h.state.sessions.open().token().to_string()
}

#[actix_web::test]
async fn health_check_answers_ok() {
  let h = harness();
  let app = app!(h);
  let resp: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
  assert_eq!(resp, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn listing_filters_by_brand() {
  let h = harness();
  create_all(
    &h.state,
    vec![watch("Submariner", "Rolex", 1.0), watch("Speedmaster", "Omega", 2.0)],
  )
  .await;
  let app = app!(h);

  let all: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/items").to_request()).await;
  assert_eq!(all["brand"], "All");
  assert_eq!(all["items"].as_array().unwrap().len(), 2);
  assert_eq!(all["items"][0]["name"], "Speedmaster");

  let rolex: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/items?brand=Rolex").to_request()).await;
  assert_eq!(rolex["brand"], "Rolex");
  assert_eq!(rolex["items"].as_array().unwrap().len(), 1);
  assert_eq!(rolex["items"][0]["brand"], "Rolex");

  let brands: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/brands").to_request()).await;
  assert_eq!(brands["brands"], json!(["All", "Omega", "Rolex"]));
}

#[actix_web::test]
async fn featured_section_is_capped() {
  let h = harness();
  let fields = (1..=5)
    .map(|n| vitrine::models::ItemFields {
      featured: true,
      ..watch(&format!("F{n}"), "Rolex", 1.0)
    })
    .collect();
  create_all(&h.state, fields).await;
  let app = app!(h);

  let featured: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/items/featured").to_request()).await;
  assert_eq!(featured["items"].as_array().unwrap().len(), 3);

  let arrivals: Value =
    test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/items/new-arrivals").to_request()).await;
  assert!(arrivals["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn unknown_or_malformed_item_is_not_found() {
  let h = harness();
  let app = app!(h);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/items/not-a-uuid").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let uri = format!("/api/items/{}", vitrine::models::ItemId::generate());
  let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn item_detail_returns_the_stored_watch() {
  let h = harness();
  let created = create_all(&h.state, vec![watch("Tank", "Cartier", 3_100.0), watch("Santos", "Cartier", 7_000.0)]).await;
  let app = app!(h);

  let uri = format!("/api/items/{}", created[0].id);
  let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
  assert_eq!(body["item"]["name"], "Tank");
  assert_eq!(body["item"]["brand"], "Cartier");
}

#[actix_web::test]
async fn gallery_steps_through_the_images() {
  let h = harness();
  let mut fields = watch("Nautilus", "Patek Philippe", 95_000.0);
  fields.image_urls = vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()];
  let item = h.state.catalog.create(fields).await.unwrap();
  let app = app!(h);

  let uri = format!("/api/items/{}/gallery?index=0&step=previous", item.id);
  let state: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
  assert_eq!(state["index"], 2);
  assert_eq!(state["current"], "c.jpg");
  assert_eq!(state["canNavigate"], true);
}

#[actix_web::test]
#[serial]
async fn login_answers_success_flag() {
  let h = harness();
  let app = app!(h);

  let req = test::TestRequest::post()
    .uri("/api/auth")
    .set_json(json!({ "password": "wrong" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "success": false }));

  let req = test::TestRequest::post()
    .uri("/api/auth")
    .set_json(json!({ "password": ADMIN_PASSWORD }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["success"], true);
  let token = body["token"].as_str().unwrap();
  assert!(h.state.sessions.resume(token).is_some());

  let req = test::TestRequest::post()
    .uri("/api/auth/logout")
    .insert_header(bearer(token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
  assert!(h.state.sessions.resume(token).is_none());
}

#[actix_web::test]
async fn admin_routes_require_a_session() {
  let h = harness();
  let app = app!(h);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/api/admin/items").to_request()).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::post()
    .uri("/api/admin/items")
    .insert_header(bearer("forged"))
    .set_json(json!({ "name": "Explorer", "price": 7000 }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(h.items.write_count(), 0);
}

#[actix_web::test]
async fn admin_creates_updates_and_deletes() {
  let h = harness();
  let token = admin_token(&h);
  let app = app!(h);

  let req = test::TestRequest::post()
    .uri("/api/admin/items")
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "Explorer", "brand": "Rolex", "price": 7000, "featured": true }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  let id = body["item"]["id"].as_str().unwrap().to_string();
  let created_at = body["item"]["createdAt"].clone();
  assert_eq!(body["inventory"].as_array().unwrap().len(), 1);
  assert_eq!(body["refreshError"], Value::Null);

  let req = test::TestRequest::put()
    .uri(&format!("/api/admin/items/{}", id))
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "Explorer II", "brand": "Rolex", "price": 9500 }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["item"]["name"], "Explorer II");
  assert_eq!(body["item"]["featured"], false);
  assert_eq!(body["item"]["createdAt"], created_at);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/admin/items/{}", id))
    .insert_header(bearer(&token))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::delete()
    .uri(&format!("/api/admin/items/{}?confirm=true", id))
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["deleted"], true);
  assert!(h.state.catalog.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn invalid_submission_is_a_bad_request() {
  let h = harness();
  let token = admin_token(&h);
  let app = app!(h);

  let req = test::TestRequest::post()
    .uri("/api/admin/items")
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "", "price": 100 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["field"], "name");

  let req = test::TestRequest::post()
    .uri("/api/admin/items")
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "Explorer", "price": "lots" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
  assert_eq!(h.items.write_count(), 0);
}

#[actix_web::test]
async fn uploaded_image_is_served_from_media() {
  let h = harness();
  let token = admin_token(&h);
  let app = app!(h);

  let req = test::TestRequest::post()
    .uri("/api/admin/uploads/caseback.png")
    .insert_header(bearer(&token))
    .set_payload(vec![0x89u8, b'P', b'N', b'G'])
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  let url = body["url"].as_str().unwrap();
  let path = url.strip_prefix(BASE_URL).unwrap();
  assert!(path.starts_with("/media/watches/"));

  let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
  let bytes = test::read_body(resp).await;
  assert_eq!(bytes.as_ref(), &[0x89u8, b'P', b'N', b'G'][..]);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/media/watches/..%2Fsecret").to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn checkout_returns_the_processor_url() {
  let h = harness();
  let item = h.state.catalog.create(watch("Daytona", "Rolex", 30_000.0)).await.unwrap();
  let app = app!(h);

  let req = test::TestRequest::post()
    .uri("/api/checkout")
    .set_json(json!({
      "itemId": item.id,
      "displayName": "Rolex Daytona",
      "price": 30000.0,
      "imageUrl": ""
    }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body, json!({ "url": "https://pay.example/session/abc" }));

  h.gateway.set_reply(ScriptedReply::Fail("declined".to_string()));
  let req = test::TestRequest::post()
    .uri("/api/checkout")
    .set_json(json!({ "itemId": item.id, "displayName": "Rolex Daytona", "price": 30000.0 }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Checkout could not be started. Please try again.");
}

#[actix_web::test]
async fn mock_payment_page_redirects_to_success() {
  let h = harness();
  let app = app!(h);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/mock-pay/session/mock_cs_1").to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
  assert_eq!(location, "http://shop.test/success");

  let path = location.strip_prefix(BASE_URL).unwrap();
  let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], "received");
  assert_eq!(body["message"], "Thank you! Your order has been received.");
}
