//! Configuration management for netattach

pub mod loader;
mod schema;

pub use loader::{load_env_source, resolve, ConfigWarning, EnvSource, LoadMode, Resolved};
pub use schema::*;
