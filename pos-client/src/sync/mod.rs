//! Menu synchronization
//!
//! [`MenuSync`] holds the canonical local menu. Mutations land locally
//! first; the service is updated afterwards on a best-effort basis. No
//! operation here surfaces a network error to the caller: connectivity is
//! observable only through [`SyncError::OfflineMode`] and the `bool`
//! results of the save calls.

mod hook;
#[cfg(test)]
mod mock;
mod state;

pub use hook::MenuSync;
pub use state::{BatchPlan, MenuState, PlannedWrite, SyncStatus, WriteRoute};

/// Degraded-connectivity marker shown by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum SyncError {
    /// Bulk fetch failed; running on seed or previously synced data
    #[error("Offline Mode")]
    OfflineMode,
}
