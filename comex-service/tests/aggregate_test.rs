use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use comex_catalog::{DimensionInput, ProductInput, ProductPatch};
use comex_core::{CatalogError, ProductStore};
use comex_service::AggregateWriter;
use comex_store::{FaultStore, MemoryStore, StoreOp};
use uuid::Uuid;

const DEADLINE: Duration = Duration::from_secs(2);

fn product_input() -> ProductInput {
    ProductInput {
        codigo_interno: "PROD0001".to_string(),
        categoria_id: Uuid::new_v4(),
        modelo: "X-200".to_string(),
        marca_comercial: "Acme".to_string(),
        descricao: "Compressor de ar industrial para linha de montagem".to_string(),
        ncm: "84144080".to_string(),
        ean: Some("7891234567895".to_string()),
        serie: true,
        unidade_medida: "UN".to_string(),
        valor_unitario: 1250.0,
        moeda: "BRL".to_string(),
    }
}

fn dimension_input() -> DimensionInput {
    DimensionInput {
        comprimento: 100.0,
        largura: 50.0,
        altura: 40.0,
        peso_liquido: 10.0,
        peso_bruto: 12.0,
    }
}

fn writer_over(store: &Arc<FaultStore>) -> AggregateWriter {
    AggregateWriter::new(store.clone(), store.clone(), DEADLINE)
}

fn faulty() -> (Arc<MemoryStore>, Arc<FaultStore>) {
    let memory = Arc::new(MemoryStore::new());
    let fault = Arc::new(FaultStore::new(memory.clone()));
    (memory, fault)
}

#[tokio::test]
async fn create_commits_product_and_dimension() {
    let (memory, store) = faulty();
    let writer = writer_over(&store);

    let aggregate = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap();

    assert_eq!(memory.product_count().await, 1);
    assert_eq!(memory.dimension_count().await, 1);

    let dimension = aggregate.dimension.unwrap();
    assert_eq!(dimension.produto_id, aggregate.product.id);
    assert_eq!(dimension.peso_cubico, 33.333);
    assert_eq!(dimension.volume, 0.2);
    assert_eq!(
        aggregate.product.descricao_resumida,
        aggregate.product.descricao
    );
}

#[tokio::test]
async fn long_description_is_truncated_on_create() {
    let (_, store) = faulty();
    let writer = writer_over(&store);

    let mut input = product_input();
    input.descricao = "x".repeat(150);
    let aggregate = writer
        .create_aggregate(input, dimension_input())
        .await
        .unwrap();

    assert_eq!(aggregate.product.descricao_resumida.chars().count(), 100);
    assert!(aggregate.product.descricao_resumida.ends_with("..."));
}

#[tokio::test]
async fn invalid_dimensions_reach_no_writes() {
    let (memory, store) = faulty();
    let writer = writer_over(&store);

    let mut input = dimension_input();
    input.peso_bruto = 5.0; // below peso_liquido

    let err = writer
        .create_aggregate(product_input(), input)
        .await
        .unwrap_err();

    match err {
        CatalogError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.field == "peso_bruto"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(memory.product_count().await, 0);
    assert_eq!(memory.dimension_count().await, 0);
}

#[tokio::test]
async fn product_write_failure_leaves_no_partial_state() {
    let (memory, store) = faulty();
    store.fail_on(StoreOp::InsertProduct).await;
    let writer = writer_over(&store);

    let err = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Store { .. }));
    assert_eq!(memory.product_count().await, 0);
    assert_eq!(memory.dimension_count().await, 0);
}

#[tokio::test]
async fn dimension_write_failure_rolls_back_product() {
    let (memory, store) = faulty();
    store.fail_on(StoreOp::InsertDimension).await;
    let writer = writer_over(&store);

    let err = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap_err();

    // The surfaced error is the dimension write's, not the delete's.
    match err {
        CatalogError::Store { source } => {
            assert!(source.to_string().contains("InsertDimension"));
        }
        other => panic!("expected Store, got {other:?}"),
    }
    assert_eq!(memory.product_count().await, 0, "rollback must remove the product");
}

#[tokio::test]
async fn failed_rollback_is_surfaced_distinctly() {
    let (memory, store) = faulty();
    store.fail_on(StoreOp::InsertDimension).await;
    store.fail_on(StoreOp::DeleteProduct).await;
    let writer = writer_over(&store);

    let err = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap_err();

    match err {
        CatalogError::RollbackFailed { write, rollback } => {
            assert!(write.to_string().contains("InsertDimension"));
            assert!(rollback.to_string().contains("DeleteProduct"));
        }
        other => panic!("expected RollbackFailed, got {other:?}"),
    }
    // Orphan product: the latent inconsistency the error reports.
    assert_eq!(memory.product_count().await, 1);
    assert_eq!(memory.dimension_count().await, 0);
}

#[tokio::test]
async fn update_patches_product_and_recomputes_dimension() {
    let (_, store) = faulty();
    let writer = writer_over(&store);

    let created = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap();

    let patch = ProductPatch {
        marca_comercial: Some("Acme do Brasil".to_string()),
        ..ProductPatch::default()
    };
    let new_dimensions = DimensionInput {
        comprimento: 60.0,
        largura: 50.0,
        altura: 40.0,
        peso_liquido: 8.0,
        peso_bruto: 9.0,
    };

    let updated = writer
        .update_aggregate(created.product.id, patch, new_dimensions)
        .await
        .unwrap();

    assert_eq!(updated.product.marca_comercial, "Acme do Brasil");
    let dimension = updated.dimension.unwrap();
    // 60 * 50 * 40 / 6000 = 20
    assert_eq!(dimension.peso_cubico, 20.0);
    assert_eq!(dimension.volume, 0.12);
}

#[tokio::test]
async fn update_of_missing_product_is_not_found() {
    let (_, store) = faulty();
    let writer = writer_over(&store);

    let err = writer
        .update_aggregate(Uuid::new_v4(), ProductPatch::default(), dimension_input())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::NotFound {
            collection: "produtos",
            ..
        }
    ));
}

#[tokio::test]
async fn dimension_failure_after_patch_reports_partial_update() {
    let (memory, store) = faulty();
    let writer = writer_over(&store);

    let created = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap();

    store.fail_on(StoreOp::ReplaceDimension).await;
    let patch = ProductPatch {
        modelo: Some("X-300".to_string()),
        ..ProductPatch::default()
    };

    let err = writer
        .update_aggregate(created.product.id, patch, dimension_input())
        .await
        .unwrap_err();

    match err {
        CatalogError::PartialUpdate { product_id, .. } => {
            assert_eq!(product_id, created.product.id);
        }
        other => panic!("expected PartialUpdate, got {other:?}"),
    }
    // The patch stays applied; only the dimension is stale.
    let product = memory.get(created.product.id).await.unwrap().unwrap();
    assert_eq!(product.modelo, "X-300");
}

#[tokio::test]
async fn update_without_dimension_row_carries_not_found_cause() {
    let (memory, store) = faulty();
    let writer = writer_over(&store);

    // A product with no dimensoes row at all.
    let orphan = product_input().into_row(Uuid::new_v4(), Utc::now());
    ProductStore::insert(memory.as_ref(), &orphan).await.unwrap();

    let err = writer
        .update_aggregate(orphan.id, ProductPatch::default(), dimension_input())
        .await
        .unwrap_err();

    match err {
        CatalogError::PartialUpdate {
            product_id,
            dimension,
        } => {
            assert_eq!(product_id, orphan.id);
            let cause = dimension.downcast_ref::<CatalogError>().unwrap();
            assert!(matches!(
                cause,
                CatalogError::NotFound {
                    collection: "dimensoes",
                    ..
                }
            ));
        }
        other => panic!("expected PartialUpdate, got {other:?}"),
    }
}

#[tokio::test]
async fn updated_description_rederives_short_description() {
    let (_, store) = faulty();
    let writer = writer_over(&store);

    let created = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap();

    let patch = ProductPatch {
        descricao: Some("y".repeat(120)),
        ..ProductPatch::default()
    };
    let updated = writer
        .update_aggregate(created.product.id, patch, dimension_input())
        .await
        .unwrap();

    assert_eq!(updated.product.descricao_resumida.chars().count(), 100);
    assert!(updated.product.descricao_resumida.ends_with("..."));
}

#[tokio::test]
async fn bulk_delete_removes_products_but_not_dimensions() {
    let (memory, store) = faulty();
    let writer = writer_over(&store);

    let first = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap();
    let second = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap();

    writer
        .delete_products(&[first.product.id, second.product.id])
        .await
        .unwrap();

    assert_eq!(memory.product_count().await, 0);
    // No cascading cleanup: dimension rows are orphaned.
    assert_eq!(memory.dimension_count().await, 2);
}

#[tokio::test]
async fn hung_store_call_is_cut_off_by_the_deadline() {
    let (_, store) = faulty();
    store.hang_on(StoreOp::InsertProduct).await;
    let writer = AggregateWriter::new(store.clone(), store.clone(), Duration::from_millis(50));

    let err = writer
        .create_aggregate(product_input(), dimension_input())
        .await
        .unwrap_err();

    match err {
        CatalogError::Store { source } => {
            assert!(source.to_string().contains("deadline"));
        }
        other => panic!("expected Store, got {other:?}"),
    }
}
