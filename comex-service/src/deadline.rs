//! Deadline enforcement for store calls. The store gives no
//! cancellation of its own, so every call the services make is bounded
//! here; an elapsed deadline surfaces as a store error.

use std::future::Future;
use std::time::Duration;

use comex_core::{BoxedStoreError, CatalogError, CatalogResult, DeadlineExceeded};

pub(crate) async fn bounded_raw<T, F>(deadline: Duration, call: F) -> Result<T, BoxedStoreError>
where
    F: Future<Output = Result<T, BoxedStoreError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(Box::new(DeadlineExceeded(deadline))),
    }
}

pub(crate) async fn bounded<T, F>(deadline: Duration, call: F) -> CatalogResult<T>
where
    F: Future<Output = Result<T, BoxedStoreError>>,
{
    bounded_raw(deadline, call).await.map_err(CatalogError::store)
}
