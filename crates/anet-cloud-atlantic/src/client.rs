//! Atlantic.Net Cloud API client
//!
//! Direct API implementation over signed GET requests. Responses are
//! wrapped in `{"<action>response": {...}}` and list their records in
//! `{"1item": {...}, "2item": {...}}` style sets.

use crate::error::{AtlanticError, Result};
use crate::signer;
use anet_cloud::Record;
use serde_json::Value;

pub const ANET_API_BASE: &str = "https://cloudapi.atlantic.net";
pub const ANET_API_VERSION: &str = "2010-12-30";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct AnetConfig {
    pub public_key: String,
    pub private_key: String,
    pub base_url: String,
    pub version: String,
}

impl AnetConfig {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_url: ANET_API_BASE.to_string(),
            version: ANET_API_VERSION.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Atlantic.Net API client
pub struct AnetClient {
    client: reqwest::Client,
    config: AnetConfig,
}

impl AnetClient {
    pub fn new(config: AnetConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.config.base_url.trim_end_matches('/'))
    }

    /// Run one API action and return the body of its `<action>response`
    async fn call(&self, action: &str, params: &[(&str, String)]) -> Result<Value> {
        let timestamp = chrono::Utc::now().timestamp();
        let rndguid = uuid::Uuid::new_v4().to_string();
        let signature = signer::sign(&self.config.private_key, timestamp, &rndguid);

        let mut query: Vec<(&str, String)> = vec![
            ("Action", action.to_string()),
            ("Format", "json".to_string()),
            ("Version", self.config.version.clone()),
            ("ACSAccessKeyId", self.config.public_key.clone()),
            ("Timestamp", timestamp.to_string()),
            ("Rndguid", rndguid),
            ("Signature", signature),
        ];
        query.extend(params.iter().cloned());

        tracing::debug!("Calling Atlantic.Net action {}", action);

        let response = self
            .client
            .get(self.endpoint())
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(AtlanticError::UnexpectedResponse {
                    action: action.to_string(),
                    detail: format!("HTTP {}: {}", status, text.trim()),
                });
            }
        };

        unwrap_envelope(action, body)
    }

    /// List every cloudserver on the account
    pub async fn list_instances(&self) -> Result<Vec<Record>> {
        let response = self.call("list-instances", &[]).await?;
        Ok(collect_items(field(&response, "instancesSet")))
    }

    /// Describe a single cloudserver
    pub async fn describe_instance(&self, instance_id: i64) -> Result<Record> {
        let response = self
            .call("describe-instance", &[("instanceid", instance_id.to_string())])
            .await?;

        collect_items(field(&response, "instanceSet"))
            .into_iter()
            .next()
            .ok_or_else(|| AtlanticError::UnexpectedResponse {
                action: "describe-instance".to_string(),
                detail: format!("no cloudserver with id {}", instance_id),
            })
    }

    /// Describe all images, or a single one when `image_id` is given
    pub async fn describe_image(&self, image_id: Option<&str>) -> Result<Vec<Record>> {
        let params: Vec<(&str, String)> = image_id
            .map(|id| vec![("imageid", id.to_string())])
            .unwrap_or_default();
        let response = self.call("describe-image", &params).await?;
        Ok(collect_items(field(&response, "imagesset")))
    }

    /// Describe all plans
    pub async fn describe_plan(&self) -> Result<Vec<Record>> {
        let response = self.call("describe-plan", &[]).await?;
        Ok(collect_items(field(&response, "plans")))
    }

    /// List SSH keys registered on the account
    pub async fn list_ssh_keys(&self) -> Result<Vec<Record>> {
        let response = self.call("list-sshkeys", &[]).await?;
        Ok(collect_items(field(&response, "KeysSet")))
    }
}

fn unwrap_envelope(action: &str, mut body: Value) -> Result<Value> {
    if let Some(error) = body.get("error").filter(|e| e.is_object()) {
        let code = error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();

        let upper = code.to_ascii_uppercase();
        if ["AUTH", "SIGNATURE", "ACCESSKEY"]
            .iter()
            .any(|marker| upper.contains(marker))
        {
            return Err(AtlanticError::AuthenticationFailed(message));
        }
        return Err(AtlanticError::Api { code, message });
    }

    let key = format!("{}response", action);
    body.get_mut(&key)
        .map(Value::take)
        .ok_or_else(|| AtlanticError::UnexpectedResponse {
            action: action.to_string(),
            detail: format!("missing '{}'", key),
        })
}

/// Case-insensitive field lookup; the API is inconsistent about casing
fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// Flatten an item set into records, ordered by their numeric key prefix
fn collect_items(set: Option<&Value>) -> Vec<Record> {
    match set {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect(),
        Some(Value::Object(map)) => {
            if let Some(item) = map.get("item") {
                return collect_items(Some(item));
            }

            let mut items: Vec<(u64, &Value)> = map
                .iter()
                .filter(|(key, value)| key.ends_with("item") && value.is_object())
                .map(|(key, value)| {
                    let position = key.trim_end_matches("item").parse().unwrap_or(u64::MAX);
                    (position, value)
                })
                .collect();

            if items.is_empty() {
                // a lone record that is not wrapped in an item set
                return vec![map.clone()];
            }

            items.sort_by_key(|(position, _)| *position);
            items
                .into_iter()
                .filter_map(|(_, value)| value.as_object().cloned())
                .collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> AnetClient {
        AnetClient::new(AnetConfig::new("public", "private").with_base_url(server.url()))
    }

    fn action(name: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("Action".into(), name.into()),
            Matcher::UrlEncoded("Format".into(), "json".into()),
            Matcher::UrlEncoded("Version".into(), ANET_API_VERSION.into()),
            Matcher::UrlEncoded("ACSAccessKeyId".into(), "public".into()),
            Matcher::Regex("Timestamp=[0-9]+".into()),
            Matcher::Regex("Rndguid=[0-9a-f-]{36}".into()),
            Matcher::Regex("Signature=".into()),
        ])
    }

    #[test]
    fn test_collect_items_orders_numbered_items() {
        let set = json!({
            "2item": {"InstanceId": "2"},
            "10item": {"InstanceId": "10"},
            "1item": {"InstanceId": "1"}
        });

        let ids: Vec<_> = collect_items(Some(&set))
            .into_iter()
            .map(|r| r["InstanceId"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_collect_items_shapes() {
        assert_eq!(collect_items(Some(&json!({"item": {"a": 1}}))).len(), 1);
        assert_eq!(collect_items(Some(&json!({"item": [{"a": 1}, {"a": 2}]}))).len(), 2);
        assert_eq!(collect_items(Some(&json!([{"a": 1}]))).len(), 1);
        assert!(collect_items(Some(&json!(""))).is_empty());
        assert!(collect_items(None).is_empty());
    }

    #[test]
    fn test_error_envelope() {
        let body = json!({"error": {"code": "E_INVALIDACCESSKEY", "message": "bad key"}});
        assert!(matches!(
            unwrap_envelope("list-instances", body),
            Err(AtlanticError::AuthenticationFailed(m)) if m == "bad key"
        ));

        let body = json!({"error": {"code": "E_NOTFOUND", "message": "no such plan"}});
        assert!(matches!(
            unwrap_envelope("describe-plan", body),
            Err(AtlanticError::Api { code, .. }) if code == "E_NOTFOUND"
        ));
    }

    #[tokio::test]
    async fn test_list_instances() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(action("list-instances"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "list-instancesresponse": {
                        "instancesSet": {
                            "1item": {"InstanceId": "101", "vm_status": "RUNNING"},
                            "2item": {"InstanceId": "102", "vm_status": "STOPPED"}
                        },
                        "requestid": "abc"
                    },
                    "Timestamp": 1500000000
                })
                .to_string(),
            )
            .create_async()
            .await;

        let instances = client(&server).list_instances().await.unwrap();

        mock.assert_async().await;
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1]["InstanceId"], "102");
    }

    #[tokio::test]
    async fn test_describe_instance_sends_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                action("describe-instance"),
                Matcher::UrlEncoded("instanceid".into(), "42".into()),
            ]))
            .with_body(
                json!({
                    "describe-instanceresponse": {
                        "instanceSet": {"item": {"InstanceId": "42", "vm_status": "RUNNING"}}
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let instance = client(&server).describe_instance(42).await.unwrap();

        mock.assert_async().await;
        assert_eq!(instance["vm_status"], "RUNNING");
    }

    #[tokio::test]
    async fn test_describe_instance_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(action("describe-instance"))
            .with_body(json!({"describe-instanceresponse": {"instanceSet": ""}}).to_string())
            .create_async()
            .await;

        let err = client(&server).describe_instance(7).await.unwrap_err();
        assert!(matches!(err, AtlanticError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(action("list-sshkeys"))
            .with_body(
                json!({"error": {"code": "E_INVALIDSIGNATURE", "message": "Signature mismatch"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).list_ssh_keys().await.unwrap_err();
        assert!(matches!(err, AtlanticError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn test_non_json_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(action("describe-plan"))
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client(&server).describe_plan().await.unwrap_err();
        assert!(err.to_string().contains("502"));
    }
}
