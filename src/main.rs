//! creobatch - sequential CREOSON automation for PTC Creo.
//!
//! Runs six fixed steps against a local CREOSON bridge: start Creo, open a
//! session, change the working directory, open a part, set a parameter,
//! save. Any failure aborts the rest of the run and exits non-zero.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use creobatch::bridge::CreosonClient;
use creobatch::config::RunConfig;
use creobatch::ops::Automation;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "creobatch=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = RunConfig::default();
    tracing::info!(
        "creobatch v{} -> {}",
        env!("CARGO_PKG_VERSION"),
        config.bridge_url
    );

    let client = CreosonClient::new(config.bridge_url.clone(), config.timeout)?;
    let mut creo = Automation::new(client, &config.working_dir);

    tracing::info!("[1/6] starting Creo");
    creo.start_creo(config.start.to_params()).await?;

    tracing::info!("[2/6] connecting to Creoson");
    creo.connect().await?;

    tracing::info!(
        "[3/6] changing working directory to {}",
        config.working_dir.display()
    );
    creo.change_dir(&config.working_dir).await?;

    tracing::info!("[4/6] opening {}", config.part_file);
    creo.open_file(&config.part_file, Some(config.generic.as_str()), true, true)
        .await?;

    tracing::info!(
        "[5/6] setting parameter {} = {}",
        config.parameter_name,
        config.parameter_value
    );
    creo.set_parameter(
        &config.parameter_name,
        &config.parameter_value,
        &config.parameter_type,
    )
    .await?;

    tracing::info!("[6/6] saving {}", config.part_file);
    creo.save_file(&config.part_file).await?;

    tracing::info!("all operations completed");
    Ok(())
}
