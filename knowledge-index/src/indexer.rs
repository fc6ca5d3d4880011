use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::document::GuidelineDocument;
use crate::error::{IndexError, IndexResult};

const API_VERSION: &str = "2023-11-01";
const SEMANTIC_CONFIG: &str = "medical-semantic-config";

/// One search result from the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub content: String,
    pub source: String,
    pub score: f64,
}

/// Search index over the medical guideline knowledge base
///
/// Uses the Azure AI Search REST API when `SEARCH_ENDPOINT` / `SEARCH_KEY`
/// are configured. Otherwise every query runs against the local guideline
/// files with plain keyword scoring, which is accurate enough for the demo
/// corpus and keeps the triage flow working offline.
#[derive(Debug, Clone)]
pub struct GuidelineIndexer {
    endpoint: String,
    key: String,
    index_name: String,
    guidelines_dir: PathBuf,
    client: reqwest::Client,
    configured: bool,
}

impl GuidelineIndexer {
    /// Build the indexer from environment variables.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("SEARCH_ENDPOINT").unwrap_or_default();
        let key = std::env::var("SEARCH_KEY").unwrap_or_default();
        let index_name = std::env::var("SEARCH_INDEX_NAME")
            .unwrap_or_else(|_| "medical-knowledge-index".to_string());
        let guidelines_dir = std::env::var("GUIDELINES_DIR")
            .unwrap_or_else(|_| "data/medical_guidelines".to_string());

        let configured = !endpoint.is_empty() && !key.is_empty() && key != "your-key";
        if configured {
            info!(index = %index_name, "Azure AI Search client initialized");
        } else {
            warn!("Azure AI Search credentials not configured, using local fallback search");
        }

        Self {
            endpoint,
            key,
            index_name,
            guidelines_dir: PathBuf::from(guidelines_dir),
            client: reqwest::Client::new(),
            configured,
        }
    }

    /// Override the local guideline directory (used by tests and the server
    /// when running from a different working directory).
    pub fn with_guidelines_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.guidelines_dir = dir.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Search the knowledge base, returning at most `top` hits.
    ///
    /// Falls back to local keyword search when the cloud index is not
    /// configured or the request fails.
    ///
    /// # Errors
    ///
    /// Returns an error only when the local fallback itself cannot read the
    /// guideline directory.
    pub async fn search(&self, query: &str, top: usize) -> IndexResult<Vec<SearchHit>> {
        if !self.configured {
            return self.local_search(query, top);
        }

        match self.cloud_search(query, top).await {
            Ok(hits) => {
                info!(query = %query, results = hits.len(), "Search completed");
                Ok(hits)
            }
            Err(err) => {
                error!(error = %err, "Cloud search failed, using local fallback");
                self.local_search(query, top)
            }
        }
    }

    /// Create or update the search index with a semantic configuration.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Config` when credentials are missing, or a
    /// network/search error from the service.
    pub async fn create_index(&self) -> IndexResult<()> {
        if !self.configured {
            return Err(IndexError::Config(
                "Azure AI Search credentials not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/indexes/{}?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.index_name,
            API_VERSION
        );

        // Semantic ranking prioritizes title and content fields when
        // re-ranking keyword matches.
        let body = json!({
            "name": self.index_name,
            "fields": [
                { "name": "id", "type": "Edm.String", "key": true, "filterable": true },
                { "name": "title", "type": "Edm.String", "searchable": true },
                { "name": "content", "type": "Edm.String", "searchable": true },
                { "name": "source", "type": "Edm.String", "filterable": true }
            ],
            "semantic": {
                "defaultConfiguration": SEMANTIC_CONFIG,
                "configurations": [{
                    "name": SEMANTIC_CONFIG,
                    "prioritizedFields": {
                        "titleField": { "fieldName": "title" },
                        "prioritizedContentFields": [{ "fieldName": "content" }]
                    }
                }]
            }
        });

        let response = self
            .client
            .put(&url)
            .header("api-key", &self.key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(IndexError::Search(format!(
                "Index creation failed ({}): {}",
                status, detail
            )));
        }

        info!(index = %self.index_name, "Search index created/updated");
        Ok(())
    }

    /// Upload document chunks to the search index.
    ///
    /// Returns the number of successfully indexed documents.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Config` when credentials are missing, or a
    /// network/search error from the service.
    pub async fn upload_documents(
        &self,
        documents: &[GuidelineDocument],
    ) -> IndexResult<usize> {
        if !self.configured {
            return Err(IndexError::Config(
                "Azure AI Search credentials not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/indexes/{}/docs/index?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.index_name,
            API_VERSION
        );

        // Document keys only allow letters, digits, dashes and underscores.
        let actions: Vec<_> = documents
            .iter()
            .map(|doc| {
                json!({
                    "@search.action": "mergeOrUpload",
                    "id": sanitize_key(&doc.id),
                    "title": doc.title,
                    "content": doc.content,
                    "source": doc.source,
                })
            })
            .collect();

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.key)
            .json(&json!({ "value": actions }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(IndexError::Search(format!(
                "Document upload failed ({}): {}",
                status, detail
            )));
        }

        let result: UploadResponse = response.json().await?;
        let succeeded = result.value.iter().filter(|r| r.status).count();
        info!(
            uploaded = succeeded,
            total = documents.len(),
            "Documents uploaded to index"
        );
        Ok(succeeded)
    }

    async fn cloud_search(&self, query: &str, top: usize) -> IndexResult<Vec<SearchHit>> {
        let url = format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.index_name,
            API_VERSION
        );

        let body = json!({
            "search": query,
            "select": "title,content,source",
            "top": top,
            "queryType": "semantic",
            "semanticConfiguration": SEMANTIC_CONFIG,
        });

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let result: SearchResponse = response.json().await?;
        Ok(result
            .value
            .into_iter()
            .map(|doc| SearchHit {
                title: doc.title.unwrap_or_default(),
                content: doc.content.unwrap_or_default(),
                source: doc.source.unwrap_or_default(),
                score: doc.score.unwrap_or(0.0),
            })
            .collect())
    }

    /// Keyword search over the guideline files on disk.
    ///
    /// Scores each file by how often the query terms (longer than two
    /// characters) occur in its content.
    fn local_search(&self, query: &str, top: usize) -> IndexResult<Vec<SearchHit>> {
        if !self.guidelines_dir.exists() {
            warn!(dir = %self.guidelines_dir.display(), "Guideline directory not found");
            return Ok(Vec::new());
        }

        let keywords: Vec<String> = query
            .split_whitespace()
            .filter(|kw| kw.len() > 2)
            .map(|kw| kw.to_lowercase())
            .collect();

        let mut hits = Vec::new();
        let mut paths: Vec<_> = std::fs::read_dir(&self.guidelines_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        paths.sort();

        for path in paths {
            if !is_guideline_file(&path) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            let content_lower = content.to_lowercase();
            let score: usize = keywords
                .iter()
                .map(|kw| content_lower.matches(kw.as_str()).count())
                .sum();
            if score > 0 {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                hits.push(SearchHit {
                    title: crate::document::title_case(stem),
                    content,
                    source: path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    score: score as f64,
                });
            }
        }

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top);
        Ok(hits)
    }
}

fn is_guideline_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "txt" | "md"))
        .unwrap_or(false)
}

fn sanitize_key(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    value: Vec<SearchDocument>,
}

#[derive(Debug, Deserialize)]
struct SearchDocument {
    title: Option<String>,
    content: Option<String>,
    source: Option<String>,
    #[serde(rename = "@search.score")]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    value: Vec<UploadResult>,
}

#[derive(Debug, Deserialize)]
struct UploadResult {
    status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_key_replaces_invalid_chars() {
        assert_eq!(
            sanitize_key("chest pain.txt/chunk 0"),
            "chest_pain_txt_chunk_0"
        );
    }
}
