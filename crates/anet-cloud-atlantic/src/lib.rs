//! Atlantic.Net provider for anet-inventory
//!
//! This crate implements the CloudProvider trait against the Atlantic.Net
//! Cloud API, giving the inventory access to cloudservers, images, plans
//! and SSH keys.
//!
//! # Requirements
//!
//! - An Atlantic.Net API public key and private key
//!
//! # Example
//!
//! ```ignore
//! use anet_cloud::{CloudProvider, ResourceKind};
//! use anet_cloud_atlantic::{AnetConfig, AtlanticNetProvider};
//!
//! let provider = AtlanticNetProvider::new(AnetConfig::new("public", "private"));
//! let servers = provider.fetch(ResourceKind::Cloudservers).await?;
//! ```

pub mod client;
pub mod error;
pub mod provider;
mod signer;

pub use client::{ANET_API_BASE, ANET_API_VERSION, AnetClient, AnetConfig};
pub use error::{AtlanticError, Result};
pub use provider::AtlanticNetProvider;
