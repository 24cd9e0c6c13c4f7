use clap::Parser;
use nutrition_server::{Cli, Config, NutritionService};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("nutrition_server=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Config::from(Cli::parse());
    if config.uses_demo_key() {
        tracing::warn!("USDA_API_KEY is not set, falling back to the rate-limited DEMO_KEY");
    }

    let service = NutritionService::from_config(&config)?;
    let listener = TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %config.bind, fdc = %config.fdc_base_url, "listening");
    nutrition_server::run(listener, service).await?;
    Ok(())
}
