use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docrag::application::ports::{DocumentStore, Embedder, FileLoader, LlmClient, VectorStore};
use docrag::application::services::{IngestionService, RetrievalService};
use docrag::infrastructure::llm::{OpenAiClient, OpenAiEmbedder};
use docrag::infrastructure::observability::{TracingConfig, init_tracing};
use docrag::infrastructure::persistence::InMemoryVectorStore;
use docrag::infrastructure::storage::DocumentStoreFactory;
use docrag::infrastructure::text_processing::{ExtractorRegistry, WordWindowSplitter};
use docrag::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("failed to load settings")?;
    init_tracing(&TracingConfig::from_settings(&settings.logging));

    let document_store: Arc<dyn DocumentStore> =
        DocumentStoreFactory::create(&settings.storage).context("failed to open document store")?;

    let extractors = ExtractorRegistry::with_default_extractors();
    tracing::info!(formats = ?extractors.formats(), "Registered extractors");
    let file_loader: Arc<dyn FileLoader> = Arc::new(extractors);

    let embedder: Arc<dyn Embedder> = Arc::new(OpenAiEmbedder::new(
        settings.embeddings.base_url.clone(),
        settings.embeddings.api_key.clone(),
        settings.embeddings.model.clone(),
    ));
    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(
        settings.llm.base_url.clone(),
        settings.llm.api_key.clone(),
        settings.llm.model.clone(),
    ));

    let vector_store: Arc<dyn VectorStore> = match settings.embeddings.dimension {
        0 => Arc::new(InMemoryVectorStore::new()),
        dimension => Arc::new(InMemoryVectorStore::with_dimensions(dimension)),
    };

    let ingestion_service = Arc::new(IngestionService::new(
        Arc::clone(&document_store),
        Arc::clone(&file_loader),
        Arc::new(WordWindowSplitter::new(settings.chunking.chunk_size)),
        Arc::clone(&embedder),
        Arc::clone(&vector_store),
    ));

    let retrieval_service = Arc::new(RetrievalService::new(
        Arc::clone(&embedder),
        Arc::clone(&llm_client),
        Arc::clone(&vector_store),
        settings.llm.max_tokens,
    ));

    let state = AppState {
        ingestion_service,
        retrieval_service,
        vector_store,
        default_top_k: settings.retrieval.top_k,
    };

    let router = create_router(state, settings.request_timeout());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(
        %addr,
        chunk_size = settings.chunking.chunk_size,
        top_k = settings.retrieval.top_k,
        embedding_model = %settings.embeddings.model,
        completion_model = %settings.llm.model,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
