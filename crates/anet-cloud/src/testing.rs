//! In-memory provider recording every call

use crate::error::{CloudError, Result};
use crate::provider::CloudProvider;
use crate::resource::{Record, ResourceKind};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;

pub fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

pub struct MockProvider {
    fail: bool,
    calls: Mutex<Vec<ResourceKind>>,
    shown: Mutex<Vec<i64>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Kinds fetched so far, in call order
    pub fn calls(&self) -> Vec<ResourceKind> {
        self.calls.lock().unwrap().clone()
    }

    pub fn shown(&self) -> Vec<i64> {
        self.shown.lock().unwrap().clone()
    }

    /// What the provider returns for `kind`
    pub fn records(&self, kind: ResourceKind) -> Vec<Record> {
        vec![record(json!({"kind": kind.as_str(), "fresh": true}))]
    }

    fn respond(&self, kind: ResourceKind) -> Result<Vec<Record>> {
        self.calls.lock().unwrap().push(kind);
        if self.fail {
            return Err(CloudError::AuthenticationFailed("bad key".into()));
        }
        Ok(self.records(kind))
    }
}

#[async_trait]
impl CloudProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn all_active_cloudservers(&self) -> Result<Vec<Record>> {
        self.respond(ResourceKind::Cloudservers)
    }

    async fn all_images(&self, _filter: Option<&str>) -> Result<Vec<Record>> {
        self.respond(ResourceKind::Images)
    }

    async fn plans(&self) -> Result<Vec<Record>> {
        self.respond(ResourceKind::Plans)
    }

    async fn all_ssh_keys(&self) -> Result<Vec<Record>> {
        self.respond(ResourceKind::SshKeys)
    }

    async fn show_cloudserver(&self, id: i64) -> Result<Record> {
        self.shown.lock().unwrap().push(id);
        Ok(record(json!({
            "InstanceId": id.to_string(),
            "vm_status": "active",
            "vm_ip_address": format!("10.0.0.{}", id)
        })))
    }
}
