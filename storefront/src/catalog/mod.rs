// vitrine/src/catalog/mod.rs

pub mod gallery;
pub mod repository;
pub mod seed;
pub mod view;

pub use gallery::{GalleryCursor, GalleryState};
pub use repository::CatalogRepository;
pub use view::{BrandFilter, CatalogView, FEATURED_LIMIT, NEW_ARRIVALS_LIMIT};
