//! Code generation: category-code reservation and the sequential
//! internal product code.
//!
//! The reservation pre-check is check-then-act and only correct for a
//! single writer; the store's unique insert on `categorias.codigo`
//! stays authoritative, so a lost race is still rejected at commit.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use comex_catalog::{valid_category_code, Category, CategoryInput, FieldError};
use comex_core::{
    CatalogError, CatalogResult, CategoryInsertError, CategoryStore, DeadlineExceeded,
    ProductStore,
};
use tracing::info;
use uuid::Uuid;

use crate::deadline::bounded;

pub struct CodeGenerator {
    categories: Arc<dyn CategoryStore>,
    products: Arc<dyn ProductStore>,
    deadline: Duration,
}

impl CodeGenerator {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        products: Arc<dyn ProductStore>,
        deadline: Duration,
    ) -> Self {
        Self {
            categories,
            products,
            deadline,
        }
    }

    /// Normalize a candidate category code and check it is free.
    /// Rejects anything but exactly 4 letters, uppercases, and fails
    /// with `CodeConflict` when a category already holds the code.
    pub async fn reserve_category_code(&self, candidate: &str) -> CatalogResult<String> {
        if !valid_category_code(candidate) {
            return Err(CatalogError::Validation(vec![FieldError::new(
                "codigo",
                "o código deve ter exatamente 4 letras",
            )]));
        }
        let codigo = candidate.to_uppercase();

        let existing = bounded(self.deadline, self.categories.find_by_code(&codigo)).await?;
        if existing.is_some() {
            return Err(CatalogError::CodeConflict(codigo));
        }
        Ok(codigo)
    }

    /// Reserve the code, then insert. The insert is the source of
    /// truth for uniqueness: a conflict it reports wins over the
    /// pre-check above.
    pub async fn create_category(&self, input: CategoryInput) -> CatalogResult<Category> {
        let codigo = self.reserve_category_code(&input.codigo).await?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            codigo,
            nome: input.nome,
            descricao: input.descricao,
            created_at: now,
            updated_at: now,
        };

        match tokio::time::timeout(self.deadline, self.categories.insert(&category)).await {
            Err(_) => Err(CatalogError::store(Box::new(DeadlineExceeded(
                self.deadline,
            )))),
            Ok(Err(CategoryInsertError::CodeConflict(codigo))) => {
                Err(CatalogError::CodeConflict(codigo))
            }
            Ok(Err(CategoryInsertError::Store(source))) => Err(CatalogError::store(source)),
            Ok(Ok(())) => {
                info!(codigo = %category.codigo, "category created");
                Ok(category)
            }
        }
    }

    /// Next sequential internal product code: `PROD0001` on an empty
    /// catalog, otherwise the most recent code plus one, zero-padded
    /// to four digits.
    pub async fn next_product_code(&self) -> CatalogResult<String> {
        let latest = bounded(self.deadline, self.products.latest()).await?;
        let next = match latest {
            None => 1,
            Some(product) => {
                // An unparseable or exhausted code restarts the
                // sequence; product codes carry no uniqueness
                // invariant.
                product
                    .codigo_interno
                    .strip_prefix("PROD")
                    .and_then(|n| n.parse::<u32>().ok())
                    .and_then(|last| last.checked_add(1))
                    .unwrap_or(1)
            }
        };
        Ok(format!("PROD{next:04}"))
    }
}
