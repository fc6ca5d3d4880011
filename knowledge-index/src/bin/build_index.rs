//! One-time setup: index the medical guidelines into Azure AI Search.
//!
//! Reads every guideline file from `data/medical_guidelines/`, chunks the
//! documents with overlap, creates or updates the search index, and uploads
//! all chunks. Without Azure AI Search credentials the runtime falls back
//! to local keyword search, so running this binary is only required for
//! the cloud path.

use std::path::PathBuf;

use anyhow::Context;
use knowledge_index::{DocumentProcessor, GuidelineIndexer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let guidelines_dir = PathBuf::from(
        std::env::var("GUIDELINES_DIR").unwrap_or_else(|_| "data/medical_guidelines".to_string()),
    );

    info!("TriageCare knowledge base indexing");

    let processor = DocumentProcessor::new();
    let indexer = GuidelineIndexer::from_env();

    if indexer.is_configured() {
        indexer
            .create_index()
            .await
            .context("failed to create search index")?;
        info!("Search index created/updated");
    } else {
        warn!("Azure AI Search not configured, the system will use local fallback search");
        return Ok(());
    }

    let documents = processor
        .process_directory(&guidelines_dir)
        .context("failed to read guideline directory")?;
    anyhow::ensure!(
        !documents.is_empty(),
        "no documents found in {}",
        guidelines_dir.display()
    );

    let mut chunks = Vec::new();
    for doc in &documents {
        chunks.extend(processor.chunk_document(doc));
    }
    info!(
        documents = documents.len(),
        chunks = chunks.len(),
        "Documents chunked"
    );

    let uploaded = indexer
        .upload_documents(&chunks)
        .await
        .context("failed to upload document chunks")?;
    info!(uploaded, total = chunks.len(), "Indexing complete");

    for doc in &documents {
        info!("  indexed: {} ({})", doc.title, doc.source);
    }

    Ok(())
}
