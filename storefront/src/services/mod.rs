// vitrine/src/services/mod.rs

pub mod auth_service;
pub mod blob_store;
pub mod item_store;
pub mod payment_gateway;
pub mod payment_mock;
pub mod pg_item_store;
