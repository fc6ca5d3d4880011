//! AI-powered triage engine with guideline grounding
//!
//! Combines Azure OpenAI chat completions with retrieval over the medical
//! knowledge base to generate follow-up questions and a final triage
//! classification. The engine reasons in English; translation happens at
//! the intake layer.
//!
//! Without Azure OpenAI credentials the engine runs entirely on local
//! heuristics: keyword-matched question banks and an answer-scoring
//! fallback assessment. The fallback inspects the patient's actual answers
//! rather than echoing the complaint, so the demo produces personalized
//! assessments offline.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod models;
pub mod openai;

pub use engine::*;
pub use error::*;
pub use models::*;
pub use openai::*;
