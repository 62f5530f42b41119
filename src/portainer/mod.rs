//! Portainer API client and Docker payload models

mod client;
pub mod containers;
pub mod networks;

pub use client::PortainerClient;
pub use containers::{find_container, ContainerRecord};
pub use networks::ConnectRequest;

use reqwest::StatusCode;

use crate::error::Result;

/// Status and raw body of a Portainer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts as success
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// The two Docker calls reconciliation needs, proxied through Portainer
#[allow(async_fn_in_trait)]
pub trait ContainerApi {
    /// List the running containers of the configured instance
    async fn list_containers(&self) -> Result<ApiResponse>;

    /// Connect a container to `network`
    async fn connect_network(&self, network: &str, request: &ConnectRequest)
        -> Result<ApiResponse>;
}
