pub mod error;
pub mod store;

pub use error::{CatalogError, CatalogResult, DeadlineExceeded};
pub use store::{
    BoxedStoreError, CategoryInsertError, CategoryStore, DimensionStore, ProductStore,
};
