// vitrine/src/models/mod.rs

pub mod item;

pub use item::{Item, ItemDocument, ItemFields, ItemId, ItemImages};
