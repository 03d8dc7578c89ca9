//! One inventory run against a provider and a cache directory

use crate::commands;
use anet_cloud::{
    CacheSnapshot, CacheStore, CloudError, CloudProvider, RefreshOptions, RefreshPolicy,
    ResourceKind,
};
use anyhow::Context;
use serde_json::{Map, Value};
use std::time::Duration;

/// What the run prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Host(String),
    All,
    Resource(ResourceKind),
}

/// Everything a run needs besides the provider and the cache
pub struct RunContext<'a> {
    pub cache_max_age: Duration,
    pub options: RefreshOptions,
    pub group_variables: &'a Map<String, Value>,
}

/// Serve `view`, fetching what the cache cannot provide
///
/// The snapshot is rewritten only when something was fetched. It then holds
/// the fetched kinds next to the kinds served from the cache, along with the
/// inventory just built or, for the other views, the cached one.
pub async fn execute(
    provider: &dyn CloudProvider,
    cache: &CacheStore,
    view: &View,
    ctx: RunContext<'_>,
) -> anyhow::Result<Value> {
    let cache_valid = cache.is_valid(ctx.cache_max_age).await;
    let CacheSnapshot { data, mut inventory } = cache.load().await;

    if ctx.options.force_cache && data.is_empty() {
        return Err(CloudError::CacheEmpty.into());
    }

    let mut policy = RefreshPolicy::new(provider, data, cache_valid, ctx.options);

    let json_data = match view {
        View::Resource(kind) => commands::resources::handle(&mut policy, Some(*kind)).await?,
        View::All => commands::resources::handle(&mut policy, None).await?,
        View::Host(host) => commands::host::handle(provider, host).await?,
        View::List => {
            let built = commands::list::handle(&mut policy, ctx.group_variables).await?;
            let json_data = serde_json::to_value(&built)?;
            inventory = built;
            json_data
        }
    };

    if policy.is_refreshed() {
        let snapshot = CacheSnapshot {
            data: policy.into_data(),
            inventory,
        };
        cache
            .save(&snapshot)
            .await
            .with_context(|| format!("Failed to write cache {}", cache.path().display()))?;
    }

    Ok(json_data)
}
