//! POS Client - offline-first menu synchronization
//!
//! Talks to the menu service over HTTP, keeps an optimistic in-memory copy
//! of the menu that is always usable, and falls back to seed data when the
//! service cannot be reached.

pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod sync;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::{MenuApi, MenuBundle, NetworkMenuClient};
pub use store::{LocalStore, StoreError};
pub use sync::{BatchPlan, MenuState, MenuSync, PlannedWrite, SyncError, SyncStatus, WriteRoute};

// Re-export shared types for convenience
pub use shared::{Category, InventoryItem, MenuConcept, Product, RecipeDefinition};
