use anet_cloud::CloudProvider;
use serde_json::Value;

/// `--host`: variables of one cloudserver, always looked up live
pub async fn handle(provider: &dyn CloudProvider, host: &str) -> anyhow::Result<Value> {
    tracing::debug!("Looking up host {}", host);
    Ok(anet_cloud::host_variables(provider, host).await?)
}
