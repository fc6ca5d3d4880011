//! Guideline knowledge index for the TriageCare RAG pipeline
//!
//! Manages the Azure AI Search index that grounds question generation and
//! triage assessment in static medical-guideline documents. When Azure AI
//! Search credentials are absent the indexer transparently degrades to a
//! local keyword search over the guideline files on disk, so the demo
//! works fully offline.
//!
//! # Example
//!
//! ```rust,no_run
//! use knowledge_index::GuidelineIndexer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let indexer = GuidelineIndexer::from_env();
//! let hits = indexer.search("crushing chest pain", 3).await?;
//! for hit in hits {
//!     println!("{} ({})", hit.title, hit.source);
//! }
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod indexer;

pub use document::*;
pub use error::*;
pub use indexer::*;
