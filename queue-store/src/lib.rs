//! Incoming patient queue for the hospital ER dashboard
//!
//! Stores triaged patient records in a local SQLite database. The staff
//! dashboard polls this queue to display incoming patients with countdown
//! timers; the patient app writes a row on submission.

pub mod error;
pub mod models;
pub mod queue;

pub use error::*;
pub use models::*;
pub use queue::*;
