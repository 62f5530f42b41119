//! Configuration schema definitions

use serde::Serialize;

pub const DEFAULT_INSTANCE_ID: i64 = 1;
pub const DEFAULT_OUT_FILE_NAME: &str = "_container_data.json";

/// Resolved run configuration. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Container name as the API reports it, usually with a leading "/"
    pub container_name: String,

    #[serde(skip_serializing)]
    pub api_token: String,

    /// Portainer base URL without a trailing slash
    pub api_base_url: String,

    /// Portainer environment (endpoint) id
    pub instance_id: i64,

    pub network_name: String,

    pub save_response: bool,

    pub output_file_name: String,

    /// Skip TLS certificate validation. Portainer instances on private
    /// networks usually serve self-signed certificates.
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Endpoint listing the running containers of the instance
    pub fn containers_url(&self) -> String {
        format!(
            "{}/api/endpoints/{}/docker/containers/json",
            self.api_base_url, self.instance_id
        )
    }

    /// Endpoint connecting a container to `network`
    pub fn connect_url(&self, network: &str) -> String {
        format!(
            "{}/api/endpoints/{}/docker/networks/{}/connect",
            self.api_base_url, self.instance_id, network
        )
    }

    /// Container name without the leading "/"
    pub fn display_name(&self) -> &str {
        self.container_name.trim_start_matches('/')
    }
}
