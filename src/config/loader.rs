//! Configuration loading from the environment and an optional .env file

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::env;
use std::path::Path;

use super::schema::{Config, DEFAULT_INSTANCE_ID, DEFAULT_OUT_FILE_NAME};

pub const DEFAULT_ENV_FILE: &str = ".env";

pub const CONTAINER_NAME: &str = "CONTAINER_NAME";
pub const PORTAINER_PAT: &str = "PORTAINER_PAT";
pub const PORTAINER_URL: &str = "PORTAINER_URL";
pub const INSTANCE_ID: &str = "INSTANCE_ID";
pub const NETWORK_NAME: &str = "NETWORK_NAME";
pub const SAVE_RESPONSE: &str = "SAVE_RESPONSE";
pub const OUT_FILE_NAME: &str = "OUT_FILE_NAME";
pub const PORTAINER_VERIFY_TLS: &str = "PORTAINER_VERIFY_TLS";

/// The only value accepted as boolean true
const TRUTHY: &str = "True";

/// Snapshot of the variables visible to the resolver
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Build a source from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Snapshot of the process environment. Non-unicode entries are skipped.
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Fill gaps with `defaults`; values already present are kept
    pub fn with_fallback(mut self, defaults: HashMap<String, String>) -> Self {
        for (key, value) in defaults {
            self.vars.entry(key).or_insert(value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// How the environment was assembled
#[derive(Debug)]
pub enum LoadMode {
    /// An override file was found and merged under the process environment
    Local,
    /// No override file, process environment only
    Container,
    /// The override file exists but could not be read
    Degraded(Error),
}

/// Load the process environment, augmented by the override file at `path`
/// when one exists
pub fn load_env_source(path: &Path) -> (EnvSource, LoadMode) {
    let process = EnvSource::from_process();

    if !path.is_file() {
        return (process, LoadMode::Container);
    }

    match read_env_file(path) {
        Ok(values) => {
            tracing::debug!("Loaded {} values from {}", values.len(), path.display());
            (process.with_fallback(values), LoadMode::Local)
        }
        Err(e) => (process, LoadMode::Degraded(e)),
    }
}

/// Parse a key=value file without touching the process environment
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let to_error = |source| Error::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    dotenvy::from_path_iter(path)
        .map_err(to_error)?
        .map(|item| item.map_err(to_error))
        .collect()
}

/// A defaulted optional variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub var: &'static str,
    pub default: String,
}

/// Resolution result: the configuration plus the defaults that were applied
#[derive(Debug)]
pub struct Resolved {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve the configuration from `env`.
///
/// Required variables are checked first, in a fixed order, and the first
/// missing one is returned as an error. Optional variables fall back to
/// their defaults and each fallback is recorded as a warning.
pub fn resolve(env: &EnvSource) -> Result<Resolved> {
    let required = |name: &'static str| {
        env.get(name)
            .map(str::to_string)
            .ok_or(Error::MissingVar(name))
    };

    let container_name = required(CONTAINER_NAME)?;
    let api_token = required(PORTAINER_PAT)?;
    let api_base_url = required(PORTAINER_URL)?.trim_end_matches('/').to_string();
    let network_name = required(NETWORK_NAME)?;

    let mut warnings = Vec::new();

    let instance_id = match env.get(INSTANCE_ID) {
        Some(raw) => parse_instance_id(raw)?,
        None => {
            warnings.push(ConfigWarning {
                var: INSTANCE_ID,
                default: format!("int:{}", DEFAULT_INSTANCE_ID),
            });
            DEFAULT_INSTANCE_ID
        }
    };

    let save_response = match env.get(SAVE_RESPONSE) {
        Some(raw) => is_truthy(raw),
        None => {
            warnings.push(ConfigWarning {
                var: SAVE_RESPONSE,
                default: "bool:False".to_string(),
            });
            false
        }
    };

    let output_file_name = match env.get(OUT_FILE_NAME) {
        Some(raw) => raw.to_string(),
        None => {
            warnings.push(ConfigWarning {
                var: OUT_FILE_NAME,
                default: format!("str:{}", DEFAULT_OUT_FILE_NAME),
            });
            DEFAULT_OUT_FILE_NAME.to_string()
        }
    };

    // Verification stays off unless explicitly requested
    let accept_invalid_certs = !env.get(PORTAINER_VERIFY_TLS).is_some_and(is_truthy);

    Ok(Resolved {
        config: Config {
            container_name,
            api_token,
            api_base_url,
            instance_id,
            network_name,
            save_response,
            output_file_name,
            accept_invalid_certs,
        },
        warnings,
    })
}

/// Exact, case-sensitive match on "True"
pub fn is_truthy(raw: &str) -> bool {
    raw == TRUTHY
}

fn parse_instance_id(raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| Error::InvalidVar {
        name: INSTANCE_ID,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full() -> Vec<(&'static str, &'static str)> {
        vec![
            (CONTAINER_NAME, "/web"),
            (PORTAINER_PAT, "ptr_token"),
            (PORTAINER_URL, "https://portainer.lan:9443/"),
            (INSTANCE_ID, "2"),
            (NETWORK_NAME, "app-net"),
            (SAVE_RESPONSE, "True"),
            (OUT_FILE_NAME, "out.json"),
        ]
    }

    fn without(name: &str) -> EnvSource {
        EnvSource::from_pairs(full().into_iter().filter(|(k, _)| *k != name))
    }

    #[test]
    fn test_resolve_full() {
        let resolved = resolve(&EnvSource::from_pairs(full())).unwrap();
        let config = resolved.config;
        assert!(resolved.warnings.is_empty());
        assert_eq!(config.container_name, "/web");
        assert_eq!(config.api_base_url, "https://portainer.lan:9443");
        assert_eq!(config.instance_id, 2);
        assert!(config.save_response);
        assert_eq!(config.output_file_name, "out.json");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_missing_required_is_fatal() {
        for name in [CONTAINER_NAME, PORTAINER_PAT, PORTAINER_URL, NETWORK_NAME] {
            match resolve(&without(name)) {
                Err(Error::MissingVar(missing)) => assert_eq!(missing, name),
                other => panic!("expected MissingVar({}), got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_first_missing_required_is_reported() {
        let env = EnvSource::from_pairs([(NETWORK_NAME, "app-net")]);
        assert!(matches!(resolve(&env), Err(Error::MissingVar(CONTAINER_NAME))));
    }

    #[test]
    fn test_optional_defaults() {
        let env = EnvSource::from_pairs(
            full()
                .into_iter()
                .filter(|(k, _)| ![INSTANCE_ID, SAVE_RESPONSE, OUT_FILE_NAME].contains(k)),
        );
        let resolved = resolve(&env).unwrap();
        assert_eq!(resolved.config.instance_id, 1);
        assert!(!resolved.config.save_response);
        assert_eq!(resolved.config.output_file_name, "_container_data.json");

        let vars: Vec<_> = resolved.warnings.iter().map(|w| w.var).collect();
        assert_eq!(vars, vec![INSTANCE_ID, SAVE_RESPONSE, OUT_FILE_NAME]);
    }

    #[test]
    fn test_save_response_literal() {
        for (raw, expected) in [
            ("True", true),
            ("true", false),
            ("TRUE", false),
            ("1", false),
            ("yes", false),
            ("", false),
        ] {
            let env = EnvSource::from_pairs(
                full()
                    .into_iter()
                    .filter(|(k, _)| *k != SAVE_RESPONSE)
                    .chain([(SAVE_RESPONSE, raw)]),
            );
            assert_eq!(resolve(&env).unwrap().config.save_response, expected, "{:?}", raw);
        }
    }

    #[test]
    fn test_signed_instance_id() {
        for (raw, expected) in [("-1", -1), ("+4", 4), (" 7 ", 7)] {
            let env = EnvSource::from_pairs(
                full()
                    .into_iter()
                    .filter(|(k, _)| *k != INSTANCE_ID)
                    .chain([(INSTANCE_ID, raw)]),
            );
            assert_eq!(resolve(&env).unwrap().config.instance_id, expected, "{:?}", raw);
        }
    }

    #[test]
    fn test_invalid_instance_id() {
        let env = EnvSource::from_pairs(
            full()
                .into_iter()
                .filter(|(k, _)| *k != INSTANCE_ID)
                .chain([(INSTANCE_ID, "primary")]),
        );
        assert!(matches!(
            resolve(&env),
            Err(Error::InvalidVar { name: INSTANCE_ID, .. })
        ));
    }

    #[test]
    fn test_verify_tls_opt_in() {
        let env = EnvSource::from_pairs(full().into_iter().chain([(PORTAINER_VERIFY_TLS, "True")]));
        assert!(!resolve(&env).unwrap().config.accept_invalid_certs);
    }

    #[test]
    fn test_fallback_does_not_override() {
        let env = EnvSource::from_pairs([(NETWORK_NAME, "from-process")]).with_fallback(
            HashMap::from([
                (NETWORK_NAME.to_string(), "from-file".to_string()),
                (CONTAINER_NAME.to_string(), "/web".to_string()),
            ]),
        );
        assert_eq!(env.get(NETWORK_NAME), Some("from-process"));
        assert_eq!(env.get(CONTAINER_NAME), Some("/web"));
    }

    #[test]
    fn test_read_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# local overrides").unwrap();
        writeln!(file, "CONTAINER_NAME=/web").unwrap();
        writeln!(file, "NETWORK_NAME=\"app-net\"").unwrap();

        let values = read_env_file(file.path()).unwrap();
        assert_eq!(values.get(CONTAINER_NAME).map(String::as_str), Some("/web"));
        assert_eq!(values.get(NETWORK_NAME).map(String::as_str), Some("app-net"));
    }

    #[test]
    fn test_missing_env_file_selects_container_mode() {
        let dir = tempfile::tempdir().unwrap();
        let (_, mode) = load_env_source(&dir.path().join(".env"));
        assert!(matches!(mode, LoadMode::Container));
    }

    #[test]
    fn test_unreadable_env_file_degrades() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NOT A VALID LINE").unwrap();

        let (_, mode) = load_env_source(file.path());
        assert!(matches!(mode, LoadMode::Degraded(Error::EnvFile { .. })));
    }
}
