//! Simulated national health-record database
//!
//! Models an eNabız / NHS-style health ID system: each patient has a unique
//! health number that staff enter to pull demographics, diagnoses,
//! medications, labs, vitals, visits and allergies. All data is simulated
//! demo content seeded on first start.

pub mod error;
pub mod models;
pub mod repository;
mod seed;

pub use error::*;
pub use models::*;
pub use repository::*;
