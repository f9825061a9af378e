//! Plain read accessors for the presentational layer.

use std::sync::Arc;
use std::time::Duration;

use comex_catalog::{Category, Dimension, Product, ProductWithDimension};
use comex_core::{CatalogError, CatalogResult, CategoryStore, DimensionStore, ProductStore};
use uuid::Uuid;

use crate::deadline::bounded;

pub struct CatalogReader {
    products: Arc<dyn ProductStore>,
    dimensions: Arc<dyn DimensionStore>,
    categories: Arc<dyn CategoryStore>,
    deadline: Duration,
}

impl CatalogReader {
    pub fn new(
        products: Arc<dyn ProductStore>,
        dimensions: Arc<dyn DimensionStore>,
        categories: Arc<dyn CategoryStore>,
        deadline: Duration,
    ) -> Self {
        Self {
            products,
            dimensions,
            categories,
            deadline,
        }
    }

    /// All products, most recently created first.
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        bounded(self.deadline, self.products.list()).await
    }

    /// All categories, ordered by name.
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        bounded(self.deadline, self.categories.list()).await
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        bounded(self.deadline, self.products.get(id))
            .await?
            .ok_or(CatalogError::NotFound {
                collection: "produtos",
                id,
            })
    }

    /// A product and its dimension row. A missing product is an
    /// error; a missing dimension is a valid empty state.
    pub async fn get_product_with_dimension(
        &self,
        id: Uuid,
    ) -> CatalogResult<ProductWithDimension> {
        let product = self.get_product(id).await?;
        let dimension = self.get_dimension(id).await?;
        Ok(ProductWithDimension { product, dimension })
    }

    /// The dimension row owned by a product; `Ok(None)` when absent.
    pub async fn get_dimension(&self, produto_id: Uuid) -> CatalogResult<Option<Dimension>> {
        bounded(self.deadline, self.dimensions.get_by_product(produto_id)).await
    }
}
