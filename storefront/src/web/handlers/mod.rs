// vitrine/src/web/handlers/mod.rs

pub mod admin_handlers;
pub mod auth_handlers;
pub mod catalog_handlers;
pub mod checkout_handlers;
pub mod media_handlers;
