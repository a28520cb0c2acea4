use anyhow::Result;
use dockdash::*;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = config::AppConfig::load()?;

    // Logs go to a file; stdout is the dashboard itself.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&app_config.logging.file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    // Without a terminal there is no dashboard to mount, so nothing is
    // polled and nothing is fetched.
    if !std::io::stdout().is_terminal() {
        anyhow::bail!("{} requires an interactive terminal", version::NAME);
    }

    let api = Arc::new(api::ApiClient::new(&app_config.backend)?);
    tracing::info!(
        base_url = %app_config.backend.base_url,
        status_interval_secs = app_config.polling.status_interval_secs,
        containers_interval_secs = app_config.polling.containers_interval_secs,
        "Starting dashboard"
    );

    app::run(api, &app_config).await?;

    tracing::info!("Dashboard exited");
    Ok(())
}
