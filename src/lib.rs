//! netattach - Attach a running container to a network through Portainer
//!
//! This is the library interface for netattach: configuration resolution,
//! the Portainer client and the reconciliation step the binary runs.

pub mod cli;
pub mod config;
pub mod error;
pub mod portainer;
pub mod reconcile;

pub use config::Config;
pub use error::Error;
pub use reconcile::Outcome;
