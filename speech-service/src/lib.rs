//! Speech-to-text for the patient intake flow
//!
//! Transcribes short patient audio with automatic language detection so a
//! patient can describe symptoms in their own language. The provider seam
//! follows the same shape as the rest of the platform's cloud adapters:
//! a trait, provider implementations, and a factory keyed by configuration.
//!
//! Voice input is optional. Without speech credentials the service reports
//! itself unavailable and the text intake path is unaffected.
//!
//! # Example
//!
//! ```rust,no_run
//! use speech_service::{SpeechConfig, SpeechService};
//!
//! # async fn example(audio: Vec<u8>) -> anyhow::Result<()> {
//! let service = SpeechService::new(SpeechConfig::from_env()?)?;
//! let result = service.transcribe(&audio).await?;
//! println!("{} ({})", result.text, result.language);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod languages;
pub mod providers;
pub mod service;
pub mod transcription;

pub use config::*;
pub use error::*;
pub use languages::*;
pub use service::*;
pub use transcription::*;
