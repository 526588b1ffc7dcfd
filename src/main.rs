use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_report::{app, Config, WeatherReporter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_report=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::debug!(
        ollama_url = %config.ollama_url,
        model = %config.ollama_model,
        log = %config.log_path.display(),
        "Configuration loaded"
    );

    let reporter = WeatherReporter::new(config)?;

    let stdin = std::io::stdin();
    let exit = app::run(
        &reporter,
        &mut stdin.lock(),
        &mut std::io::stderr(),
        &mut std::io::stdout(),
    )
    .await?;
    Ok(exit)
}
