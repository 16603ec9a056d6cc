pub mod catalog_store;
pub mod pg_catalog_store;

pub use catalog_store::{CatalogStore, CatalogTx};
pub use pg_catalog_store::PgCatalogStore;
