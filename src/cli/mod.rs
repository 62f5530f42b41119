//! CLI interface for netattach

mod output;

pub use output::*;

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::DEFAULT_ENV_FILE;

#[derive(Parser)]
#[command(name = "netattach")]
#[command(author = "Krakaw")]
#[command(version)]
#[command(
    about = "Attach a running container to a network through the Portainer API",
    long_about = "Attach a running container to a network through the Portainer API.\n\n\
        Settings are read from the environment: CONTAINER_NAME, PORTAINER_PAT, PORTAINER_URL, \
        NETWORK_NAME (required) and INSTANCE_ID, SAVE_RESPONSE, OUT_FILE_NAME, \
        PORTAINER_VERIFY_TLS (optional). Values from the env file fill in anything \
        the environment does not set."
)]
pub struct Cli {
    /// Optional key=value file merged under the process environment
    #[arg(long, env = "NETATTACH_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}
