//! Content safety screening for patient input
//!
//! Optional layer over Azure AI Content Safety. Patients legitimately
//! describe injuries and self-harm symptoms, so the violence and self-harm
//! thresholds sit higher than the defaults. The filter fails open: when the
//! service is unconfigured or unreachable, content is allowed through and
//! triage continues.

pub mod error;
pub mod filter;

pub use error::*;
pub use filter::*;
