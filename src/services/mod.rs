pub mod catalog_service;
pub use catalog_service::{CatalogError, CatalogService};

pub mod catalog_service_impl;
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod discover;
pub use discover::{DiscoverError, DiscoverService};
