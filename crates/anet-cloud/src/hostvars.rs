//! Variables for a single host, always fetched live

use crate::error::{CloudError, Result};
use crate::provider::CloudProvider;
use serde_json::{Map, Value, json};

const HOSTVAR_PREFIX: &str = "anet_";

/// Parse a `--host` argument as a cloudserver id
pub fn parse_host_id(host: &str) -> Result<i64> {
    host.trim()
        .parse()
        .map_err(|_| CloudError::InvalidHostId(host.to_string()))
}

/// Look up one cloudserver and publish every field under an `anet_` prefix
///
/// Returns `{"cloudserver": {"anet_<field>": value, ...}}`.
pub async fn host_variables(provider: &dyn CloudProvider, host: &str) -> Result<Value> {
    let id = parse_host_id(host)?;
    let cloudserver = provider.show_cloudserver(id).await?;

    let info: Map<String, Value> = cloudserver
        .into_iter()
        .map(|(key, value)| (format!("{}{}", HOSTVAR_PREFIX, key), value))
        .collect();

    Ok(json!({ "cloudserver": info }))
}
