pub mod store;

pub use store::CatalogStore;
