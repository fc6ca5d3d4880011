//! Hospital lookup and ETA calculation
//!
//! Ranks candidate emergency departments near the patient by *effective*
//! ETA: the travel time plus a fixed penalty for the department's current
//! occupancy, so a slightly farther but empty hospital can beat a nearer
//! one that is full. Travel times come from Azure Maps when configured and
//! from a haversine estimate otherwise.

pub mod directory;
pub mod error;
pub mod routing;
pub mod service;

pub use directory::*;
pub use error::*;
pub use routing::*;
pub use service::*;
