//! Async traits over the remote store. The backend is an opaque
//! collaborator exposing per-row create/read/update/delete/query on
//! named collections; it gives per-row atomicity only, never cross-row
//! transactions. The aggregate writer exists because of that gap.

use async_trait::async_trait;
use comex_catalog::{Category, Dimension, Product, ProductPatch};
use uuid::Uuid;

pub type BoxedStoreError = Box<dyn std::error::Error + Send + Sync>;

/// Access to the `produtos` collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), BoxedStoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Product>, BoxedStoreError>;

    /// All products, most recently created first.
    async fn list(&self) -> Result<Vec<Product>, BoxedStoreError>;

    /// The most recently created product, if any.
    async fn latest(&self) -> Result<Option<Product>, BoxedStoreError>;

    /// Partial field update. Returns the updated row, or `None` when
    /// no row matched the id.
    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, BoxedStoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), BoxedStoreError>;

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), BoxedStoreError>;
}

/// Access to the `dimensoes` collection, keyed by owning product.
#[async_trait]
pub trait DimensionStore: Send + Sync {
    async fn insert(&self, dimension: &Dimension) -> Result<(), BoxedStoreError>;

    /// The dimension row owned by a product. `Ok(None)` when absent.
    async fn get_by_product(&self, produto_id: Uuid) -> Result<Option<Dimension>, BoxedStoreError>;

    /// Replace the data and derived fields of the row owned by
    /// `produto_id`, keeping the row's identity and `created_at`.
    /// Returns the stored row, or `None` when no row matched.
    async fn replace_for_product(
        &self,
        produto_id: Uuid,
        dimension: &Dimension,
    ) -> Result<Option<Dimension>, BoxedStoreError>;
}

/// Insert failure for `categorias`: the unique constraint on `codigo`
/// is enforced by the store itself, so a conflict is reported apart
/// from other store errors and stays authoritative even when the
/// caller's pre-check lost a race.
#[derive(Debug, thiserror::Error)]
pub enum CategoryInsertError {
    #[error("category code already exists: {0}")]
    CodeConflict(String),
    #[error(transparent)]
    Store(BoxedStoreError),
}

/// Access to the `categorias` collection.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert(&self, category: &Category) -> Result<(), CategoryInsertError>;

    async fn find_by_code(&self, codigo: &str) -> Result<Option<Category>, BoxedStoreError>;

    /// All categories, ordered by `nome`.
    async fn list(&self) -> Result<Vec<Category>, BoxedStoreError>;
}
