use anet_cloud::{RefreshPolicy, ResourceKind};
use serde_json::{Value, json};

/// `--cloudservers`, `--images`, `--plans`, `--ssh-keys` and `--all`:
/// raw resource data keyed by kind
pub async fn handle(
    policy: &mut RefreshPolicy<'_>,
    kind: Option<ResourceKind>,
) -> anyhow::Result<Value> {
    policy.load(kind).await?;

    let json_data = match kind {
        Some(kind) => json!({ kind.as_str(): policy.data().records(kind) }),
        None => serde_json::to_value(policy.data())?,
    };
    Ok(json_data)
}
