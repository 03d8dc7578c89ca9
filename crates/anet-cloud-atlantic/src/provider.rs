//! Atlantic.Net provider implementation

use crate::client::{AnetClient, AnetConfig};
use anet_cloud::{CloudProvider, Record};
use async_trait::async_trait;
use serde_json::Value;

/// Status of cloudservers that no longer exist
const REMOVED_STATUS: &str = "REMOVED";

/// Atlantic.Net provider
pub struct AtlanticNetProvider {
    client: AnetClient,
}

impl AtlanticNetProvider {
    pub fn new(config: AnetConfig) -> Self {
        Self {
            client: AnetClient::new(config),
        }
    }
}

/// Give a listed cloudserver the `id` and `name` fields the inventory uses
fn normalize_cloudserver(mut record: Record) -> Record {
    if !record.contains_key("id")
        && let Some(instance_id) = record.get("InstanceId").cloned()
    {
        let id = instance_id
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or(instance_id);
        record.insert("id".to_string(), id);
    }

    if !record.contains_key("name")
        && let Some(description) = record.get("vm_description").cloned()
    {
        record.insert("name".to_string(), description);
    }

    record
}

fn is_active(record: &Record) -> bool {
    record.get("vm_status").and_then(Value::as_str) != Some(REMOVED_STATUS)
}

#[async_trait]
impl CloudProvider for AtlanticNetProvider {
    fn name(&self) -> &str {
        "atlantic-net"
    }

    async fn all_active_cloudservers(&self) -> anet_cloud::Result<Vec<Record>> {
        let instances = self.client.list_instances().await?;
        let total = instances.len();

        let active: Vec<Record> = instances
            .into_iter()
            .filter(is_active)
            .map(normalize_cloudserver)
            .collect();

        tracing::debug!("{} of {} cloudservers are active", active.len(), total);
        Ok(active)
    }

    async fn all_images(&self, filter: Option<&str>) -> anet_cloud::Result<Vec<Record>> {
        Ok(self.client.describe_image(filter).await?)
    }

    async fn plans(&self) -> anet_cloud::Result<Vec<Record>> {
        Ok(self.client.describe_plan().await?)
    }

    async fn all_ssh_keys(&self) -> anet_cloud::Result<Vec<Record>> {
        Ok(self.client.list_ssh_keys().await?)
    }

    async fn show_cloudserver(&self, id: i64) -> anet_cloud::Result<Record> {
        Ok(self.client.describe_instance(id).await?)
    }
}
