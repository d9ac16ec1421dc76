//! Shared types for the POS workspace
//!
//! Menu and order models used by both the sync client and the local
//! development menu service, plus the static seed data both start from.

pub mod models;
pub mod price;
pub mod seed;
pub mod util;

// Re-exports
pub use models::*;
pub use seed::SeedData;
pub use serde::{Deserialize, Serialize};
