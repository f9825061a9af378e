//! Fault-injecting wrapper around a real backend. Lets tests fail or
//! hang individual store operations to exercise the aggregate writer's
//! rollback edges and the call deadline.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use comex_catalog::{Category, Dimension, Product, ProductPatch};
use comex_core::store::{
    BoxedStoreError, CategoryInsertError, CategoryStore, DimensionStore, ProductStore,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::memory::MemoryStore;

/// One store operation, as seen by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    InsertProduct,
    UpdateProduct,
    DeleteProduct,
    InsertDimension,
    ReplaceDimension,
    GetDimension,
    InsertCategory,
    FindCategory,
}

#[derive(Debug, Clone, Copy)]
enum Fault {
    Fail,
    Hang,
}

pub struct FaultStore {
    inner: Arc<MemoryStore>,
    faults: Mutex<HashMap<StoreOp, Fault>>,
}

impl FaultStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            faults: Mutex::new(HashMap::new()),
        }
    }

    /// Make the given operation return an injected error.
    pub async fn fail_on(&self, op: StoreOp) {
        self.faults.lock().await.insert(op, Fault::Fail);
    }

    /// Make the given operation never resolve.
    pub async fn hang_on(&self, op: StoreOp) {
        self.faults.lock().await.insert(op, Fault::Hang);
    }

    pub async fn clear(&self, op: StoreOp) {
        self.faults.lock().await.remove(&op);
    }

    async fn trip(&self, op: StoreOp) -> Result<(), BoxedStoreError> {
        let fault = self.faults.lock().await.get(&op).copied();
        match fault {
            None => Ok(()),
            Some(Fault::Fail) => Err(format!("injected failure on {op:?}").into()),
            Some(Fault::Hang) => std::future::pending().await,
        }
    }
}

#[async_trait]
impl ProductStore for FaultStore {
    async fn insert(&self, product: &Product) -> Result<(), BoxedStoreError> {
        self.trip(StoreOp::InsertProduct).await?;
        ProductStore::insert(self.inner.as_ref(), product).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, BoxedStoreError> {
        ProductStore::get(self.inner.as_ref(), id).await
    }

    async fn list(&self) -> Result<Vec<Product>, BoxedStoreError> {
        ProductStore::list(self.inner.as_ref()).await
    }

    async fn latest(&self) -> Result<Option<Product>, BoxedStoreError> {
        self.inner.latest().await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, BoxedStoreError> {
        self.trip(StoreOp::UpdateProduct).await?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), BoxedStoreError> {
        self.trip(StoreOp::DeleteProduct).await?;
        ProductStore::delete(self.inner.as_ref(), id).await
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), BoxedStoreError> {
        self.trip(StoreOp::DeleteProduct).await?;
        self.inner.delete_many(ids).await
    }
}

#[async_trait]
impl DimensionStore for FaultStore {
    async fn insert(&self, dimension: &Dimension) -> Result<(), BoxedStoreError> {
        self.trip(StoreOp::InsertDimension).await?;
        DimensionStore::insert(self.inner.as_ref(), dimension).await
    }

    async fn get_by_product(&self, produto_id: Uuid) -> Result<Option<Dimension>, BoxedStoreError> {
        self.trip(StoreOp::GetDimension).await?;
        self.inner.get_by_product(produto_id).await
    }

    async fn replace_for_product(
        &self,
        produto_id: Uuid,
        dimension: &Dimension,
    ) -> Result<Option<Dimension>, BoxedStoreError> {
        self.trip(StoreOp::ReplaceDimension).await?;
        self.inner.replace_for_product(produto_id, dimension).await
    }
}

#[async_trait]
impl CategoryStore for FaultStore {
    async fn insert(&self, category: &Category) -> Result<(), CategoryInsertError> {
        self.trip(StoreOp::InsertCategory)
            .await
            .map_err(CategoryInsertError::Store)?;
        CategoryStore::insert(self.inner.as_ref(), category).await
    }

    async fn find_by_code(&self, codigo: &str) -> Result<Option<Category>, BoxedStoreError> {
        self.trip(StoreOp::FindCategory).await?;
        self.inner.find_by_code(codigo).await
    }

    async fn list(&self) -> Result<Vec<Category>, BoxedStoreError> {
        CategoryStore::list(self.inner.as_ref()).await
    }
}
