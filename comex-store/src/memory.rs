//! In-memory store backend. Honors the same consistency contract as
//! the remote document store: each call touches one collection and is
//! atomic per row, with no cross-collection transactions. The unique
//! constraint on `categorias.codigo` lives here, making the insert the
//! source of truth for code uniqueness.

use std::collections::HashMap;

use async_trait::async_trait;
use comex_catalog::{Category, Dimension, Product, ProductPatch};
use comex_core::store::{
    BoxedStoreError, CategoryInsertError, CategoryStore, DimensionStore, ProductStore,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    produtos: RwLock<HashMap<Uuid, Product>>,
    // Keyed by produto_id: the collection's unique constraint.
    dimensoes: RwLock<HashMap<Uuid, Dimension>>,
    categorias: RwLock<HashMap<Uuid, Category>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct row count, for assertions in tests.
    pub async fn product_count(&self) -> usize {
        self.produtos.read().await.len()
    }

    pub async fn dimension_count(&self) -> usize {
        self.dimensoes.read().await.len()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert(&self, product: &Product) -> Result<(), BoxedStoreError> {
        self.produtos
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, BoxedStoreError> {
        Ok(self.produtos.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, BoxedStoreError> {
        let mut rows: Vec<Product> = self.produtos.read().await.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn latest(&self) -> Result<Option<Product>, BoxedStoreError> {
        Ok(self
            .produtos
            .read()
            .await
            .values()
            .max_by_key(|p| p.created_at)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, BoxedStoreError> {
        let mut rows = self.produtos.write().await;
        match rows.get_mut(&id) {
            Some(product) => {
                patch.apply_to(product, chrono::Utc::now());
                Ok(Some(product.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), BoxedStoreError> {
        self.produtos.write().await.remove(&id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), BoxedStoreError> {
        let mut rows = self.produtos.write().await;
        for id in ids {
            rows.remove(id);
        }
        Ok(())
    }
}

#[async_trait]
impl DimensionStore for MemoryStore {
    async fn insert(&self, dimension: &Dimension) -> Result<(), BoxedStoreError> {
        let mut rows = self.dimensoes.write().await;
        if rows.contains_key(&dimension.produto_id) {
            return Err(format!(
                "dimension already exists for product {}",
                dimension.produto_id
            )
            .into());
        }
        rows.insert(dimension.produto_id, dimension.clone());
        Ok(())
    }

    async fn get_by_product(&self, produto_id: Uuid) -> Result<Option<Dimension>, BoxedStoreError> {
        Ok(self.dimensoes.read().await.get(&produto_id).cloned())
    }

    async fn replace_for_product(
        &self,
        produto_id: Uuid,
        dimension: &Dimension,
    ) -> Result<Option<Dimension>, BoxedStoreError> {
        let mut rows = self.dimensoes.write().await;
        match rows.get_mut(&produto_id) {
            None => Ok(None),
            Some(existing) => {
                existing.comprimento = dimension.comprimento;
                existing.largura = dimension.largura;
                existing.altura = dimension.altura;
                existing.peso_liquido = dimension.peso_liquido;
                existing.peso_bruto = dimension.peso_bruto;
                existing.peso_cubico = dimension.peso_cubico;
                existing.volume = dimension.volume;
                existing.updated_at = dimension.updated_at;
                Ok(Some(existing.clone()))
            }
        }
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert(&self, category: &Category) -> Result<(), CategoryInsertError> {
        let mut rows = self.categorias.write().await;
        if rows.values().any(|c| c.codigo == category.codigo) {
            return Err(CategoryInsertError::CodeConflict(category.codigo.clone()));
        }
        rows.insert(category.id, category.clone());
        Ok(())
    }

    async fn find_by_code(&self, codigo: &str) -> Result<Option<Category>, BoxedStoreError> {
        Ok(self
            .categorias
            .read()
            .await
            .values()
            .find(|c| c.codigo == codigo)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, BoxedStoreError> {
        let mut rows: Vec<Category> = self.categorias.read().await.values().cloned().collect();
        rows.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(rows)
    }
}
