use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use home_feed::config::Config;
use home_feed::updater;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "home_feed=info".into()),
        )
        // Logs go to stderr; stdout carries only the status line
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Optional first argument overrides the config path
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "home-feed.toml".to_string());

    let config = Config::load(&config_path)?;
    info!(
        "Loaded {} sources from {}, updating {}",
        config.sources.len(),
        config_path,
        config.output.display()
    );

    // One clock read for the whole run; item timestamps and document
    // stamps must agree.
    let now = Utc::now();
    let summary = updater::run(&config, now).await?;

    println!("{}", summary);

    Ok(())
}
