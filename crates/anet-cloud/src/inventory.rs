//! Ansible inventory built from the cloudserver list
//!
//! Every cloudserver is reachable through its id and name (bare one-host
//! lists) and through the derived groups `image_*`, `plan_*`, `distro_*` and
//! `status_*`. The inventory is rebuilt from scratch on every `--list`.

use crate::error::{CloudError, Result};
use crate::resource::Record;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Group holding every host plus the configured group variables
pub const ALL_GROUP: &str = "all";

/// Reserved entry carrying per-host variables
pub const META_GROUP: &str = "_meta";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\-.]").unwrap());

/// Converts characters that are not valid in Ansible group names to underscores
pub fn to_safe(word: &str) -> String {
    UNSAFE_CHARS.replace_all(word, "_").into_owned()
}

/// A named group of hosts with its variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostGroup {
    pub hosts: Vec<String>,
    pub vars: Map<String, Value>,
}

/// The `_meta` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryMeta {
    pub hostvars: Map<String, Value>,
}

/// One top-level inventory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InventoryEntry {
    /// Shortcut from a cloudserver id or name to its address
    HostAlias(Vec<String>),
    Group(HostGroup),
    Meta(InventoryMeta),
}

/// Ansible inventory, serialized as a flat JSON object with sorted keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: BTreeMap<String, InventoryEntry>,
}

impl Inventory {
    /// Empty inventory with the reserved `all` and `_meta` entries
    pub fn new(group_variables: Map<String, Value>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            ALL_GROUP.to_string(),
            InventoryEntry::Group(HostGroup {
                hosts: Vec::new(),
                vars: group_variables,
            }),
        );
        entries.insert(
            META_GROUP.to_string(),
            InventoryEntry::Meta(InventoryMeta::default()),
        );
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&InventoryEntry> {
        self.entries.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&HostGroup> {
        match self.entries.get(name)? {
            InventoryEntry::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InventoryEntry)> {
        self.entries.iter()
    }

    /// Register an id/name shortcut; the last server with a given key wins,
    /// but a group is never replaced by a shortcut
    fn set_alias(&mut self, name: String, address: &str) {
        match self.entries.get(&name) {
            Some(InventoryEntry::Group(_) | InventoryEntry::Meta(_)) => {
                tracing::warn!("Not aliasing '{}', a group of that name exists", name);
            }
            _ => {
                self.entries
                    .insert(name, InventoryEntry::HostAlias(vec![address.to_string()]));
            }
        }
    }

    /// Append a host to a group, creating the group on first use
    fn push_host(&mut self, name: String, address: &str) {
        let entry = self
            .entries
            .entry(name)
            .or_insert_with(|| InventoryEntry::Group(HostGroup::default()));

        if !matches!(entry, InventoryEntry::Group(_)) {
            tracing::warn!("Replacing host alias with a group of the same name");
            *entry = InventoryEntry::Group(HostGroup::default());
        }
        if let InventoryEntry::Group(group) = entry {
            group.hosts.push(address.to_string());
        }
    }
}

/// Fields of a cloudserver record the builder reads
struct CloudServer {
    id: String,
    name: String,
    address: String,
    image: Option<String>,
    image_display_name: Option<String>,
    plan_name: String,
    status: String,
}

impl CloudServer {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: required(record, "id")?,
            name: required(record, "name")?,
            address: required(record, "vm_ip_address")?,
            image: optional(record, "vm_image"),
            image_display_name: optional(record, "vm_image_display_name"),
            plan_name: required(record, "vm_plan_name")?,
            status: required(record, "vm_status")?,
        })
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required(record: &Record, key: &str) -> Result<String> {
    record.get(key).and_then(scalar).ok_or_else(|| {
        let id = record.get("id").and_then(scalar).unwrap_or_else(|| "?".into());
        CloudError::InvalidRecord(format!("cloudserver {} has no usable '{}'", id, key))
    })
}

fn optional(record: &Record, key: &str) -> Option<String> {
    record.get(key).and_then(scalar)
}

/// Build the inventory from the cloudservers, in the order they were returned
pub fn build_inventory(
    cloudservers: &[Record],
    group_variables: &Map<String, Value>,
) -> Result<Inventory> {
    let mut inventory = Inventory::new(group_variables.clone());

    for record in cloudservers {
        let server = CloudServer::from_record(record)?;
        let dest = server.address.as_str();

        inventory.push_host(ALL_GROUP.to_string(), dest);

        inventory.set_alias(server.id.clone(), dest);
        inventory.set_alias(server.name.clone(), dest);

        // groups that are always present
        let image = server.image.as_deref().unwrap_or_default();
        let distro = server.image_display_name.as_deref().unwrap_or_default();
        for group in [
            format!("image_{}", to_safe(image)),
            format!("plan_{}", server.plan_name),
            format!("distro_{}", to_safe(distro)),
            format!("status_{}", server.status),
        ] {
            inventory.push_host(group, dest);
        }

        // groups that are only present when the provider filled the field;
        // a non-empty image id lands in its image group a second time
        for value in [&server.image, &server.image_display_name]
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
        {
            inventory.push_host(format!("image_{}", to_safe(value)), dest);
        }
    }

    tracing::debug!(
        "Built inventory with {} entries from {} cloudservers",
        inventory.len(),
        cloudservers.len()
    );
    Ok(inventory)
}
