//! Resource kinds and the raw resource data fetched from the provider

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single provider record (cloudserver, image, plan or SSH key).
///
/// The schema belongs to the provider; only the inventory builder looks
/// inside cloudserver records.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Kind of resource that can be fetched from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Cloudservers,
    Images,
    Plans,
    SshKeys,
}

impl ResourceKind {
    /// Every kind, in fetch order
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Cloudservers,
        ResourceKind::Images,
        ResourceKind::Plans,
        ResourceKind::SshKeys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Cloudservers => "cloudservers",
            ResourceKind::Images => "images",
            ResourceKind::Plans => "plans",
            ResourceKind::SshKeys => "ssh_keys",
        }
    }

    /// Whether a request for `requested` (`None` meaning every kind) covers this kind
    pub fn matches(&self, requested: Option<ResourceKind>) -> bool {
        requested.is_none_or(|kind| kind == *self)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw resource data indexed by kind.
///
/// A kind is always replaced wholesale; records of one kind are never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSet {
    kinds: BTreeMap<ResourceKind, Vec<Record>>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&[Record]> {
        self.kinds.get(&kind).map(Vec::as_slice)
    }

    /// Records of `kind`, or an empty slice when the kind was never loaded
    pub fn records(&self, kind: ResourceKind) -> &[Record] {
        self.get(kind).unwrap_or_default()
    }

    pub fn replace(&mut self, kind: ResourceKind, records: Vec<Record>) {
        self.kinds.insert(kind, records);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKind, &Vec<Record>)> {
        self.kinds.iter()
    }
}
