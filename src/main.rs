use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netattach::cli::{self, Cli};
use netattach::config;
use netattach::portainer::PortainerClient;
use netattach::reconcile;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netattach=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        cli::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    cli::banner(chrono::Local::now(), &cwd);

    let (env, mode) = config::load_env_source(&cli.env_file);
    cli::load_mode(&mode, &cli.env_file);

    let resolved = match config::resolve(&env) {
        Ok(resolved) => resolved,
        Err(e @ netattach::Error::MissingVar(name)) => {
            cli::error(&e.to_string());
            println!("Since '{}' is required, the script will exit.", name);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    for warning in &resolved.warnings {
        cli::config_warning(warning);
    }

    let config = resolved.config;
    tracing::debug!("Resolved configuration: {}", serde_json::to_string(&config)?);

    let client = PortainerClient::new(config.clone())?;
    let outcome = reconcile::run(&config, &client).await?;
    tracing::info!("Reconciliation finished: {:?}", outcome);

    Ok(())
}
