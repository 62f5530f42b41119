//! Portainer client wrapper using reqwest

use reqwest::header::{HeaderMap, HeaderValue};

use super::{ApiResponse, ConnectRequest, ContainerApi};
use crate::config::{loader::PORTAINER_PAT, Config};
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "x-api-key";

/// Wrapper around a reqwest client preconfigured for one Portainer instance
#[derive(Clone)]
pub struct PortainerClient {
    inner: reqwest::Client,
    config: Config,
}

impl PortainerClient {
    /// Create a new client. No timeout is set and nothing is retried.
    pub fn new(config: Config) -> Result<Self> {
        let mut token = HeaderValue::from_str(&config.api_token).map_err(|e| Error::InvalidVar {
            name: PORTAINER_PAT,
            value: "<redacted>".to_string(),
            reason: e.to_string(),
        })?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, token);

        if config.accept_invalid_certs {
            tracing::debug!("TLS certificate validation disabled for {}", config.api_base_url);
        }

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { inner, config })
    }
}

impl ContainerApi for PortainerClient {
    async fn list_containers(&self) -> Result<ApiResponse> {
        let url = self.config.containers_url();
        tracing::debug!("GET {}", url);

        let response = self.inner.get(&url).send().await?;
        let status = response.status();
        Ok(ApiResponse::new(status, response.text().await?))
    }

    async fn connect_network(
        &self,
        network: &str,
        request: &ConnectRequest,
    ) -> Result<ApiResponse> {
        let url = self.config.connect_url(network);
        tracing::debug!("POST {}", url);

        let response = self.inner.post(&url).json(request).send().await?;
        let status = response.status();
        Ok(ApiResponse::new(status, response.text().await?))
    }
}
