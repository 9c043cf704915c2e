use herald_common::config::AppConfig;
use herald_notifier::telegram::TelegramNotifier;
use herald_poller::client::PracticumClient;
use herald_poller::poller::{StatusPoller, TokioSleeper};
use herald_poller::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials are checked once, before anything touches the network.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_stdout();
            tracing::error!(severity = "CRITICAL", error = %e, "Cannot start without configuration");
            return Err(e.into());
        }
    };

    let _guard = telemetry::init(&config)?;

    tracing::info!(?config, "Homework status bot starting...");

    let mut poller = StatusPoller::new(
        PracticumClient::from_config(&config),
        TelegramNotifier::from_config(&config),
        TokioSleeper,
        config.retry_period,
        chrono::Utc::now().timestamp(),
    );

    // Run until Ctrl+C
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
        }
    }

    tracing::info!("Homework status bot stopped.");
    Ok(())
}
