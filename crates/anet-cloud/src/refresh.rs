//! Per-kind decision between fetching from the provider and serving the cache

use crate::error::Result;
use crate::provider::CloudProvider;
use crate::resource::{ResourceKind, ResourceSet};

/// Cache overrides from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Never fetch; only use what the cache holds
    pub force_cache: bool,

    /// Refresh every kind whenever any kind is requested
    pub refresh_cache: bool,
}

/// Loads resource data for the requested views, starting from the cached data
pub struct RefreshPolicy<'a> {
    provider: &'a dyn CloudProvider,
    options: RefreshOptions,
    cache_valid: bool,
    data: ResourceSet,
    refreshed: bool,
}

impl<'a> RefreshPolicy<'a> {
    pub fn new(
        provider: &'a dyn CloudProvider,
        cached: ResourceSet,
        cache_valid: bool,
        options: RefreshOptions,
    ) -> Self {
        Self {
            provider,
            options,
            cache_valid,
            data: cached,
            refreshed: false,
        }
    }

    /// Kinds that have to be fetched for `requested` (`None` meaning every kind)
    pub fn kinds_to_fetch(&self, requested: Option<ResourceKind>) -> Vec<ResourceKind> {
        if self.options.force_cache {
            return Vec::new();
        }

        // Cloudservers are never served from the cache; their address and
        // status have to be current
        let always_fresh = matches!(requested, None | Some(ResourceKind::Cloudservers));
        if self.cache_valid && !always_fresh {
            return Vec::new();
        }

        let requested = if self.options.refresh_cache {
            None
        } else {
            requested
        };

        ResourceKind::ALL
            .into_iter()
            .filter(|kind| kind.matches(requested))
            .collect()
    }

    /// Fetch whatever `kinds_to_fetch` selects, replacing those kinds wholesale
    pub async fn load(&mut self, requested: Option<ResourceKind>) -> Result<()> {
        let kinds = self.kinds_to_fetch(requested);
        if kinds.is_empty() {
            tracing::debug!(
                "Serving {} from cache",
                requested.map_or("all resources", |k| k.as_str())
            );
            return Ok(());
        }

        for kind in kinds {
            let records = self.provider.fetch(kind).await?;
            tracing::info!("Fetched {} {}", records.len(), kind);
            self.data.replace(kind, records);
            self.refreshed = true;
        }
        Ok(())
    }

    pub fn data(&self) -> &ResourceSet {
        &self.data
    }

    /// Whether any kind was fetched, meaning the cache should be rewritten
    pub fn is_refreshed(&self) -> bool {
        self.refreshed
    }

    pub fn into_data(self) -> ResourceSet {
        self.data
    }
}
