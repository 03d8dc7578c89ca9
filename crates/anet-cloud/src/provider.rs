//! Cloud provider trait definition

use crate::error::Result;
use crate::resource::{Record, ResourceKind};
use async_trait::async_trait;

/// Cloud provider abstraction trait
///
/// The provider is the only component that talks to the network. Every
/// call may fail on authentication or transport errors; callers propagate
/// those failures without retrying.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "atlantic-net")
    fn name(&self) -> &str;

    /// All cloudservers that have not been removed
    async fn all_active_cloudservers(&self) -> Result<Vec<Record>>;

    /// All images, optionally narrowed to a single image id
    async fn all_images(&self, filter: Option<&str>) -> Result<Vec<Record>>;

    /// All plans
    async fn plans(&self) -> Result<Vec<Record>>;

    /// All SSH keys registered on the account
    async fn all_ssh_keys(&self) -> Result<Vec<Record>>;

    /// A single cloudserver by id
    async fn show_cloudserver(&self, id: i64) -> Result<Record>;

    /// Fetch every record of one resource kind
    async fn fetch(&self, kind: ResourceKind) -> Result<Vec<Record>> {
        tracing::debug!("Fetching {} from {}", kind, self.name());
        match kind {
            ResourceKind::Cloudservers => self.all_active_cloudservers().await,
            ResourceKind::Images => self.all_images(None).await,
            ResourceKind::Plans => self.plans().await,
            ResourceKind::SshKeys => self.all_ssh_keys().await,
        }
    }
}
