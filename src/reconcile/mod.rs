//! Network reconciliation for a single container
//!
//! Fetches the container listing, locates the configured container and
//! connects it to the configured network when it is not attached yet.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::Path;

use crate::cli::{info, networks_line, status_line, success};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::portainer::{find_container, ConnectRequest, ContainerApi, ContainerRecord};

/// What a reconciliation run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The container was already on the network, nothing was sent
    AlreadyAttached,
    /// A connect call was issued; `status` is whatever the API answered
    Connected { status: reqwest::StatusCode },
}

/// Ensure the configured container is attached to the configured network
pub async fn run<A: ContainerApi>(config: &Config, api: &A) -> Result<Outcome> {
    println!("Getting container data:");
    let listing = api.list_containers().await?;
    println!("{}", status_line(&listing));

    if !listing.is_ok() {
        return Err(Error::Api {
            status: listing.status,
            body: listing.body,
        });
    }

    let payload: serde_json::Value = serde_json::from_str(&listing.body)?;
    let listing = Vec::<serde_json::Value>::deserialize(&payload)?;
    tracing::debug!("Fetched {} containers", listing.len());

    let entry = find_container(&listing, &config.container_name)
        .ok_or_else(|| Error::ContainerNotFound(config.container_name.clone()))?;
    let container = ContainerRecord::from_value(entry)?;

    let networks = container.network_names();
    println!("{}", networks_line(config.display_name(), &networks));

    let outcome = if container.is_attached_to(&config.network_name) {
        success(&format!(
            "{} found for container. No action needed.",
            config.network_name
        ));
        Outcome::AlreadyAttached
    } else {
        info(&format!(
            "{} not found for container. Adding network {} to container {}",
            config.network_name,
            config.network_name,
            config.display_name()
        ));

        let request = ConnectRequest::new(&container.id);
        let response = api.connect_network(&config.network_name, &request).await?;
        println!("{}", status_line(&response));

        if !response.is_ok() {
            tracing::warn!(
                "Connect to {} returned {}",
                config.network_name,
                response.status
            );
        }
        Outcome::Connected {
            status: response.status,
        }
    };

    if config.save_response {
        save_response(&payload, Path::new(&config.output_file_name))?;
        tracing::info!("Saved container listing to {}", config.output_file_name);
    }

    Ok(outcome)
}

/// Write `payload` as 4-space indented JSON, replacing `path` atomically
pub fn save_response(payload: &serde_json::Value, path: &Path) -> Result<()> {
    let to_error = |source| Error::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(to_error)?;
    {
        let mut serializer = serde_json::Serializer::with_formatter(
            file.as_file_mut(),
            PrettyFormatter::with_indent(b"    "),
        );
        payload.serialize(&mut serializer)?;
    }
    file.as_file_mut().flush().map_err(to_error)?;

    file.persist(path).map_err(|e| to_error(e.error))?;
    Ok(())
}
