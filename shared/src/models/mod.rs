//! Data models
//!
//! Menu models travel over the menu service API as camelCase JSON.
//! Local store row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod category;
pub mod concept;
pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod product;
pub mod recipe;

// Re-exports
pub use category::*;
pub use concept::*;
pub use inventory::*;
pub use menu_item::*;
pub use order::*;
pub use product::*;
pub use recipe::*;
