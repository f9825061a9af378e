//! Product duplication: copy a product and, when one exists, its
//! dimension row. The dimension half reuses the aggregate creation
//! path, so the copy's cubic weight and volume are recomputed from the
//! raw values rather than copied stale.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use comex_catalog::{Product, ProductWithDimension};
use comex_core::{CatalogResult, DimensionStore, ProductStore};
use tracing::info;
use uuid::Uuid;

use crate::deadline::bounded;
use crate::dimension::DimensionWriter;

/// Appended to the copied `descricao`.
const COPY_MARKER: &str = " (Cópia)";

pub struct DuplicationService {
    products: Arc<dyn ProductStore>,
    dimensions: Arc<dyn DimensionStore>,
    writer: DimensionWriter,
    deadline: Duration,
}

impl DuplicationService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        dimensions: Arc<dyn DimensionStore>,
        deadline: Duration,
    ) -> Self {
        Self {
            products,
            writer: DimensionWriter::new(dimensions.clone(), deadline),
            dimensions,
            deadline,
        }
    }

    /// Duplicate a product. Copies every field except identity and
    /// timestamps, appends the copy marker to the description and
    /// keeps the short description verbatim. Dimension duplication is
    /// best effort: a failure there is reported but the product copy
    /// stays.
    pub async fn duplicate(&self, source: &Product) -> CatalogResult<ProductWithDimension> {
        // A product may transiently lack a dimension row; absence is a
        // valid empty case here.
        let source_dimension = bounded(
            self.deadline,
            self.dimensions.get_by_product(source.id),
        )
        .await?;

        let now = Utc::now();
        let copy = Product {
            id: Uuid::new_v4(),
            codigo_interno: source.codigo_interno.clone(),
            categoria_id: source.categoria_id,
            modelo: source.modelo.clone(),
            marca_comercial: source.marca_comercial.clone(),
            descricao: format!("{}{}", source.descricao, COPY_MARKER),
            // Deliberately copied verbatim, not recomputed from the
            // marked-up description.
            descricao_resumida: source.descricao_resumida.clone(),
            ncm: source.ncm.clone(),
            ean: source.ean.clone(),
            serie: source.serie,
            unidade_medida: source.unidade_medida.clone(),
            valor_unitario: source.valor_unitario,
            moeda: source.moeda.clone(),
            created_at: now,
            updated_at: now,
        };

        bounded(self.deadline, self.products.insert(&copy)).await?;

        let dimension = match source_dimension {
            None => None,
            Some(original) => Some(self.writer.create(copy.id, original.raw_input()).await?),
        };

        info!(source = %source.id, copy = %copy.id, "product duplicated");
        Ok(ProductWithDimension {
            product: copy,
            dimension,
        })
    }
}
