use anet_cloud::{Inventory, RefreshPolicy, ResourceKind, build_inventory};
use serde_json::{Map, Value};

/// `--list`: refresh the cloudservers and group them into an inventory
pub async fn handle(
    policy: &mut RefreshPolicy<'_>,
    group_variables: &Map<String, Value>,
) -> anyhow::Result<Inventory> {
    policy.load(Some(ResourceKind::Cloudservers)).await?;

    let cloudservers = policy.data().records(ResourceKind::Cloudservers);
    Ok(build_inventory(cloudservers, group_variables)?)
}
