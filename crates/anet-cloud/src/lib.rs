//! Atlantic.Net inventory core
//!
//! Resource model, snapshot cache, refresh policy and inventory building
//! shared by the `anet_inventory` binary and provider implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 anet_inventory                   │
//! │        (--list / --host / --images ...)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                  anet-cloud                      │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │RefreshPolicy │──│  CacheStore  │             │
//! │  └──────┬───────┘  └──────────────┘             │
//! │  ┌──────▼───────┐  ┌──────────────┐             │
//! │  │CloudProvider │  │  Inventory   │             │
//! │  └──────────────┘  └──────────────┘             │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼──────────┐
//! │ atlantic-net API │
//! └──────────────────┘
//! ```

pub mod cache;
pub mod error;
pub mod hostvars;
pub mod inventory;
pub mod provider;
pub mod refresh;
pub mod resource;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use cache::{CacheSnapshot, CacheStore};
pub use error::{CloudError, Result};
pub use hostvars::{host_variables, parse_host_id};
pub use inventory::{HostGroup, Inventory, InventoryEntry, build_inventory, to_safe};
pub use provider::CloudProvider;
pub use refresh::{RefreshOptions, RefreshPolicy};
pub use resource::{Record, ResourceKind, ResourceSet};
