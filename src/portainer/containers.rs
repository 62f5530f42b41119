//! Container listing payloads

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One entry of the Docker container listing. Only the fields needed for
/// reconciliation are modelled; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerRecord {
    pub id: String,

    /// Display names, first one canonical, usually prefixed with "/"
    #[serde(default, deserialize_with = "null_as_default")]
    pub names: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub network_settings: NetworkSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkSettings {
    /// Settings per attached network, in API order. Values are opaque.
    #[serde(default, deserialize_with = "null_as_default")]
    pub networks: Map<String, Value>,
}

/// Docker reports absent collections as null as often as it omits them
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContainerRecord {
    /// Decode a single raw listing entry
    pub fn from_value(entry: &Value) -> serde_json::Result<Self> {
        Self::deserialize(entry)
    }

    /// Canonical name as reported by the API
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Names of the networks the container is attached to, in API order
    pub fn network_names(&self) -> Vec<&str> {
        self.network_settings.networks.keys().map(String::as_str).collect()
    }

    pub fn is_attached_to(&self, network: &str) -> bool {
        self.network_settings.networks.contains_key(network)
    }
}

/// Canonical name of a raw listing entry
fn first_name(entry: &Value) -> Option<&str> {
    entry.get("Names")?.get(0)?.as_str()
}

/// First raw entry whose canonical name equals `name` exactly. Other
/// entries are never decoded, so their shape does not matter.
pub fn find_container<'a>(listing: &'a [Value], name: &str) -> Option<&'a Value> {
    listing.iter().find(|entry| first_name(entry) == Some(name))
}
