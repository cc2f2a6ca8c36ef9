use std::sync::Arc;

use docrag::application::ports::{VectorStore, VectorStoreError};
use docrag::domain::{Chunk, Embedding, EmbeddingRecord};
use docrag::infrastructure::persistence::InMemoryVectorStore;

fn record(key: &str, index: usize, text: &str, values: Vec<f32>) -> EmbeddingRecord {
    EmbeddingRecord::new(
        Chunk::new(key.to_string(), index, text.to_string()),
        Embedding::new(values),
    )
}

fn texts(results: &[docrag::application::ports::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.record.text()).collect()
}

async fn seeded() -> InMemoryVectorStore {
    let store = InMemoryVectorStore::new();
    store.upsert(record("doc", 0, "east", vec![1.0, 0.0])).await.unwrap();
    store.upsert(record("doc", 1, "north", vec![0.0, 1.0])).await.unwrap();
    store.upsert(record("doc", 2, "north-east", vec![1.0, 1.0])).await.unwrap();
    store
}

#[tokio::test]
async fn given_records_when_searching_then_returns_nearest_first() {
    let store = seeded().await;

    let results = store.search(&Embedding::new(vec![1.0, 0.2]), 3).await.unwrap();

    assert_eq!(texts(&results), vec!["east", "north-east", "north"]);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn given_k_larger_than_index_when_searching_then_returns_every_record() {
    let store = seeded().await;

    let results = store.search(&Embedding::new(vec![0.0, 1.0]), 50).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].record.text(), "north");
    assert!((results[0].score - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn given_zero_k_when_searching_then_returns_nothing() {
    let store = seeded().await;

    let results = store.search(&Embedding::new(vec![1.0, 0.0]), 0).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn given_empty_index_when_searching_then_returns_nothing() {
    let store = InMemoryVectorStore::new();

    let results = store.search(&Embedding::new(vec![1.0, 0.0, 0.0]), 5).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(store.dimensions().await.unwrap(), None);
}

#[tokio::test]
async fn given_equally_distant_records_when_searching_then_earliest_inserted_wins() {
    let store = InMemoryVectorStore::new();
    store.upsert(record("b.pdf", 0, "first", vec![0.0, 1.0])).await.unwrap();
    store.upsert(record("a.pdf", 0, "second", vec![0.0, 2.0])).await.unwrap();
    store.upsert(record("c.pdf", 0, "third", vec![0.0, 3.0])).await.unwrap();

    let results = store.search(&Embedding::new(vec![0.0, 1.0]), 2).await.unwrap();

    assert_eq!(texts(&results), vec!["first", "second"]);
}

#[tokio::test]
async fn given_existing_key_when_upserting_then_record_is_replaced_in_place() {
    let store = InMemoryVectorStore::new();
    store.upsert(record("doc", 0, "old", vec![0.0, 1.0])).await.unwrap();
    store.upsert(record("other", 0, "tie", vec![0.0, 1.0])).await.unwrap();

    store.upsert(record("doc", 0, "new", vec![0.0, 1.0])).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    let results = store.search(&Embedding::new(vec![0.0, 1.0]), 2).await.unwrap();
    assert_eq!(texts(&results), vec!["new", "tie"]);
}

#[tokio::test]
async fn given_mismatched_dimension_when_upserting_then_rejects_and_leaves_index_unchanged() {
    let store = seeded().await;

    let result = store.upsert(record("doc", 9, "3d", vec![1.0, 0.0, 0.0])).await;

    assert!(matches!(
        result,
        Err(VectorStoreError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn given_mismatched_dimension_when_searching_then_returns_error() {
    let store = seeded().await;

    let result = store.search(&Embedding::new(vec![1.0, 0.0, 0.0]), 1).await;

    assert!(matches!(
        result,
        Err(VectorStoreError::DimensionMismatch { .. })
    ));
}

#[tokio::test]
async fn given_pinned_dimension_when_first_upsert_differs_then_rejects() {
    let store = InMemoryVectorStore::with_dimensions(3);

    let result = store.upsert(record("doc", 0, "2d", vec![1.0, 0.0])).await;

    assert!(matches!(
        result,
        Err(VectorStoreError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(store.dimensions().await.unwrap(), Some(3));
}

#[tokio::test]
async fn given_empty_vector_when_upserting_then_rejects_as_invalid() {
    let store = InMemoryVectorStore::new();

    let result = store.upsert(record("doc", 0, "nothing", Vec::new())).await;

    assert!(matches!(result, Err(VectorStoreError::InvalidVector(_))));
    assert_eq!(store.dimensions().await.unwrap(), None);
}

#[tokio::test]
async fn given_concurrent_upserts_when_all_finish_then_every_record_is_indexed() {
    let store = Arc::new(InMemoryVectorStore::new());

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .upsert(record(&format!("doc-{i}.pdf"), 0, "text", vec![1.0, i as f32]))
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(store.count().await.unwrap(), 16);
}
