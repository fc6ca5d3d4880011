//! Local fallback search over the bundled guideline files

use knowledge_index::{DocumentProcessor, GuidelineIndexer};

fn guidelines_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/medical_guidelines")
}

fn test_indexer() -> GuidelineIndexer {
    GuidelineIndexer::from_env().with_guidelines_dir(guidelines_dir())
}

#[tokio::test]
async fn local_search_finds_chest_pain_protocol() {
    let indexer = test_indexer();
    let hits = indexer
        .search("chest pain emergency protocol", 3)
        .await
        .unwrap();

    assert!(!hits.is_empty());
    assert!(
        hits.iter().any(|h| h.source.to_lowercase().contains("chest")),
        "expected chest pain protocol in results, got: {:?}",
        hits.iter().map(|h| &h.source).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn local_search_finds_stroke_guideline() {
    let indexer = test_indexer();
    let hits = indexer
        .search("stroke FAST assessment face arm speech", 3)
        .await
        .unwrap();
    assert!(!hits.is_empty());
}

#[tokio::test]
async fn local_search_finds_diabetic_guideline() {
    let indexer = test_indexer();
    let hits = indexer
        .search("diabetic ketoacidosis DKA hypoglycemia", 3)
        .await
        .unwrap();
    assert!(!hits.is_empty());
}

#[tokio::test]
async fn local_search_is_score_ordered_and_capped() {
    let indexer = test_indexer();
    let hits = indexer.search("pain protocol emergency", 2).await.unwrap();
    assert!(hits.len() <= 2);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn unmatched_query_returns_nothing() {
    let indexer = test_indexer();
    let hits = indexer.search("zzzqqqxxx", 3).await.unwrap();
    assert!(hits.is_empty());
}

#[test]
fn processor_reads_all_guideline_files() {
    let processor = DocumentProcessor::new();
    let docs = processor.process_directory(&guidelines_dir()).unwrap();
    assert!(docs.len() >= 4, "expected at least 4 guideline files");
    for doc in &docs {
        assert!(!doc.content.is_empty());
        assert!(!doc.title.is_empty());
    }
}
