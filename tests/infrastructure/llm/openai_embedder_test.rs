use httpmock::prelude::*;
use serde_json::json;

use docrag::application::ports::{Embedder, EmbedderError};
use docrag::infrastructure::llm::OpenAiEmbedder;

const MODEL: &str = "text-embedding-3-small";

fn embedder(server: &MockServer, api_key: Option<&str>) -> OpenAiEmbedder {
    OpenAiEmbedder::new(
        server.url("/v1"),
        api_key.map(str::to_string),
        MODEL.to_string(),
    )
}

#[tokio::test]
async fn given_batch_when_embedding_then_vectors_follow_input_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/embeddings")
                .header("authorization", "Bearer sk-test")
                .json_body(json!({ "input": ["first", "second"], "model": MODEL }));
            then.status(200).json_body(json!({
                "data": [
                    { "index": 1, "embedding": [0.0, 1.0] },
                    { "index": 0, "embedding": [1.0, 0.0] }
                ]
            }));
        })
        .await;

    let vectors = embedder(&server, Some("sk-test"))
        .embed_batch(&["first", "second"])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(vectors[0].values, vec![1.0, 0.0]);
    assert_eq!(vectors[1].values, vec![0.0, 1.0]);
}

#[tokio::test]
async fn given_single_text_when_embedding_then_returns_one_vector() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(200)
                .json_body(json!({ "data": [{ "index": 0, "embedding": [0.5, 0.5, 0.5] }] }));
        })
        .await;

    let vector = embedder(&server, None).embed("hello").await.unwrap();

    assert_eq!(vector.dimensions(), 3);
}

#[tokio::test]
async fn given_blank_text_when_embedding_then_fails_without_calling_api() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;

    let result = embedder(&server, None).embed_batch(&["fine", "  "]).await;

    assert!(matches!(result, Err(EmbedderError::EmptyInput(1))));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn given_empty_batch_when_embedding_then_returns_empty_without_calling_api() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(500);
        })
        .await;

    let vectors = embedder(&server, None).embed_batch(&[]).await.unwrap();

    assert!(vectors.is_empty());
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn given_rate_limit_response_when_embedding_then_returns_rate_limited() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(429).body("slow down");
        })
        .await;

    let result = embedder(&server, None).embed("hello").await;

    assert!(matches!(result, Err(EmbedderError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_embedding_then_returns_api_request_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(401).body("invalid api key");
        })
        .await;

    let result = embedder(&server, Some("sk-wrong")).embed("hello").await;

    assert!(matches!(result, Err(EmbedderError::ApiRequestFailed(ref msg)) if msg.contains("401")));
}

#[tokio::test]
async fn given_short_response_when_embedding_batch_then_returns_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(200)
                .json_body(json!({ "data": [{ "index": 0, "embedding": [1.0] }] }));
        })
        .await;

    let result = embedder(&server, None).embed_batch(&["one", "two"]).await;

    assert!(matches!(result, Err(EmbedderError::InvalidResponse(_))));
}
