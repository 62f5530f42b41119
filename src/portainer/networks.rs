//! Network connect payloads

use serde::Serialize;
use std::collections::BTreeMap;

/// Body of `POST /networks/{name}/connect`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectRequest {
    pub container: String,
    pub endpoint_config: BTreeMap<String, serde_json::Value>,
}

impl ConnectRequest {
    /// Connect `container_id` with an empty endpoint config
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container: container_id.into(),
            endpoint_config: BTreeMap::new(),
        }
    }
}
