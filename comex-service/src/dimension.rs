//! The single creation/replacement path for dimension rows: validate,
//! recompute the derived fields, write. Both the aggregate writer and
//! the duplication service go through here, so cubic weight and volume
//! are always fresh relative to the raw values being written.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use comex_catalog::{validate_dimensions, Dimension, DimensionInput};
use comex_core::{BoxedStoreError, CatalogError, CatalogResult, DimensionStore};
use uuid::Uuid;

use crate::deadline::bounded_raw;

pub(crate) struct DimensionWriter {
    dimensions: Arc<dyn DimensionStore>,
    deadline: Duration,
}

impl DimensionWriter {
    pub(crate) fn new(dimensions: Arc<dyn DimensionStore>, deadline: Duration) -> Self {
        Self {
            dimensions,
            deadline,
        }
    }

    /// Validate and insert a dimension row for a product.
    pub(crate) async fn create(
        &self,
        produto_id: Uuid,
        input: DimensionInput,
    ) -> CatalogResult<Dimension> {
        validate_dimensions(&input).map_err(CatalogError::Validation)?;
        self.insert_row(produto_id, input)
            .await
            .map_err(CatalogError::store)
    }

    /// Insert without re-validating; the caller has already run the
    /// checks. Returns the raw store error so the caller can still
    /// compensate.
    pub(crate) async fn insert_row(
        &self,
        produto_id: Uuid,
        input: DimensionInput,
    ) -> Result<Dimension, BoxedStoreError> {
        let row = input.into_row(produto_id, Utc::now());
        bounded_raw(self.deadline, self.dimensions.insert(&row)).await?;
        Ok(row)
    }

    /// Replace the row owned by `produto_id` with recomputed derived
    /// fields. `Ok(None)` when no row matched.
    pub(crate) async fn replace_row(
        &self,
        produto_id: Uuid,
        input: DimensionInput,
    ) -> Result<Option<Dimension>, BoxedStoreError> {
        let row = input.into_row(produto_id, Utc::now());
        bounded_raw(
            self.deadline,
            self.dimensions.replace_for_product(produto_id, &row),
        )
        .await
    }
}
