use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use health_records::HealthRecords;
use knowledge_index::GuidelineIndexer;
use maps_service::MapsService;
use queue_store::PatientQueue;
use safety_filter::SafetyFilter;
use speech_service::{SpeechConfig, SpeechService};
use translation_service::Translator;
use triage_engine::TriageEngine;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name shown in health/version responses
    pub name: String,
    /// Path of the patient queue database
    pub queue_db: PathBuf,
    /// Path of the health record database
    pub records_db: PathBuf,
    /// Directory holding the guideline documents for local RAG fallback
    pub guidelines_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            name: "TriageCare".to_string(),
            queue_db: std::env::var("QUEUE_DB_PATH")
                .unwrap_or_else(|_| "patient_queue.db".to_string())
                .into(),
            records_db: std::env::var("HEALTH_DB_PATH")
                .unwrap_or_else(|_| "data/health_records.db".to_string())
                .into(),
            guidelines_dir: std::env::var("GUIDELINES_DIR")
                .unwrap_or_else(|_| "data/medical_guidelines".to_string())
                .into(),
        }
    }
}

/// Main TriageCare server state
#[derive(Clone)]
pub struct TriageCareServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Incoming patient queue
    pub queue: PatientQueue,
    /// Demo health-record database
    pub records: HealthRecords,
    /// Triage engine (question generation + assessment)
    pub engine: Arc<TriageEngine>,
    /// Speech-to-text service
    pub speech: Arc<SpeechService>,
    /// Translator between patient language and English backend
    pub translator: Translator,
    /// Content safety filter
    pub safety: SafetyFilter,
    /// Hospital lookup and routing
    pub maps: MapsService,
}

impl TriageCareServer {
    /// Create a new server instance, opening both databases and wiring up
    /// every cloud adapter (each falls back locally when unconfigured).
    ///
    /// # Errors
    ///
    /// Returns an error when a database cannot be opened or the speech
    /// configuration is invalid.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        if let Some(parent) = config.records_db.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let queue = PatientQueue::connect(&config.queue_db).await?;
        let records = HealthRecords::connect(&config.records_db).await?;

        let indexer =
            GuidelineIndexer::from_env().with_guidelines_dir(config.guidelines_dir.clone());
        let engine = Arc::new(TriageEngine::new(indexer));
        let speech = Arc::new(SpeechService::new(SpeechConfig::from_env()?)?);
        let translator = Translator::from_env();
        let safety = SafetyFilter::from_env();
        let maps = MapsService::from_env();

        info!(
            name = %config.name,
            model_configured = engine.is_model_configured(),
            speech_available = speech.is_available(),
            translator_configured = translator.is_configured(),
            routing_configured = maps.is_routing_configured(),
            "TriageCare server initialized"
        );

        Ok(Self {
            config,
            queue,
            records,
            engine,
            speech,
            translator,
            safety,
            maps,
        })
    }
}
