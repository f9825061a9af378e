//! Aggregate writer: persists a product and its dimension row as one
//! logical unit against a store that only guarantees per-row
//! atomicity. Creation runs Init → ProductWritten → committed, with a
//! compensating delete back out of ProductWritten when the dimension
//! write fails.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use comex_catalog::{
    validate_dimensions, validate_product, DimensionInput, ProductInput, ProductPatch,
    ProductWithDimension,
};
use comex_core::{CatalogError, CatalogResult, DimensionStore, ProductStore};
use tracing::{info, warn};
use uuid::Uuid;

use crate::deadline::{bounded, bounded_raw};
use crate::dimension::DimensionWriter;

pub struct AggregateWriter {
    products: Arc<dyn ProductStore>,
    dimensions: DimensionWriter,
    deadline: Duration,
}

impl AggregateWriter {
    pub fn new(
        products: Arc<dyn ProductStore>,
        dimensions: Arc<dyn DimensionStore>,
        deadline: Duration,
    ) -> Self {
        Self {
            products,
            dimensions: DimensionWriter::new(dimensions, deadline),
            deadline,
        }
    }

    /// Create a product together with its dimension row. On a
    /// dimension-write failure the just-created product is deleted
    /// again (best effort) and the dimension error is surfaced; a
    /// failed compensation surfaces as `RollbackFailed` instead.
    pub async fn create_aggregate(
        &self,
        product: ProductInput,
        dimensions: DimensionInput,
    ) -> CatalogResult<ProductWithDimension> {
        let mut errors = validate_product(&product).err().unwrap_or_default();
        if let Err(dimension_errors) = validate_dimensions(&dimensions) {
            errors.extend(dimension_errors);
        }
        if !errors.is_empty() {
            return Err(CatalogError::Validation(errors));
        }

        let row = product.into_row(Uuid::new_v4(), Utc::now());
        bounded(self.deadline, self.products.insert(&row)).await?;

        match self.dimensions.insert_row(row.id, dimensions).await {
            Ok(dimension) => {
                info!(produto_id = %row.id, "product aggregate committed");
                Ok(ProductWithDimension {
                    product: row,
                    dimension: Some(dimension),
                })
            }
            Err(write) => {
                warn!(
                    produto_id = %row.id,
                    error = %write,
                    "dimension write failed, rolling back product"
                );
                match bounded_raw(self.deadline, self.products.delete(row.id)).await {
                    // Rollback succeeded: surface the original
                    // dimension error, not the delete's outcome.
                    Ok(()) => Err(CatalogError::store(write)),
                    Err(rollback) => {
                        warn!(
                            produto_id = %row.id,
                            error = %rollback,
                            "compensating delete failed, orphan product left in store"
                        );
                        Err(CatalogError::RollbackFailed { write, rollback })
                    }
                }
            }
        }
    }

    /// Patch a product and replace its dimension row with recomputed
    /// derived fields. A dimension failure after the patch has been
    /// applied is reported explicitly as `PartialUpdate`; the patch is
    /// not rolled back.
    pub async fn update_aggregate(
        &self,
        product_id: Uuid,
        patch: ProductPatch,
        dimensions: DimensionInput,
    ) -> CatalogResult<ProductWithDimension> {
        validate_dimensions(&dimensions).map_err(CatalogError::Validation)?;

        let mut patch = patch;
        if let Some(descricao) = &patch.descricao {
            patch.descricao_resumida = Some(comex_catalog::short_description(descricao));
        }

        let updated = bounded(self.deadline, self.products.update(product_id, &patch)).await?;
        let product = updated.ok_or(CatalogError::NotFound {
            collection: "produtos",
            id: product_id,
        })?;

        match self.dimensions.replace_row(product_id, dimensions).await {
            Ok(Some(dimension)) => {
                info!(produto_id = %product_id, "product aggregate updated");
                Ok(ProductWithDimension {
                    product,
                    dimension: Some(dimension),
                })
            }
            // The absent row is carried as a structured cause so
            // callers can tell it apart from a store failure.
            Ok(None) => Err(CatalogError::PartialUpdate {
                product_id,
                dimension: Box::new(CatalogError::NotFound {
                    collection: "dimensoes",
                    id: product_id,
                }),
            }),
            Err(dimension) => Err(CatalogError::PartialUpdate {
                product_id,
                dimension,
            }),
        }
    }

    /// Bulk delete by id. Dimension rows of deleted products are left
    /// behind; cascading cleanup is the collaborator's concern.
    pub async fn delete_products(&self, ids: &[Uuid]) -> CatalogResult<()> {
        bounded(self.deadline, self.products.delete_many(ids)).await?;
        info!(count = ids.len(), "products deleted");
        Ok(())
    }
}
