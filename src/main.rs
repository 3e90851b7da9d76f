mod cli;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use vidresolve::config::Config;
use vidresolve::observability::{self, Metrics};
use vidresolve::resolve::Orchestrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    observability::init_tracing(&cli.log_level);

    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    match cli.command {
        Commands::Server(args) => vidresolve::api::run(config, args.address).await?,
        Commands::Resolve(args) => {
            let orchestrator = Orchestrator::from_config(&config, Arc::new(Metrics::new()))?;
            let catalog = orchestrator.resolve(&args.reference).await?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
    }

    Ok(())
}
