//! Science Helper - terminal front end
//!
//! Asks the Science Helper backend questions from the terminal. Answers and
//! errors go to stdout, logs to stderr.

use science_helper::{
    terminal, AskClient, ClientConfig, FileStore, HttpAskClient, LoggingClient, MemoryStore,
    Orchestrator, SessionManager, SessionStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "science_helper=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        session_file = ?config.session_file,
        "Starting Science Helper client"
    );

    let http = HttpAskClient::new(&config)?;

    // Runs alongside the prompt; the first question does not wait for it
    let probe = http.clone();
    tokio::spawn(async move {
        match probe.health().await {
            Ok(health) => tracing::info!(
                status = %health.status,
                message = health.message.as_deref().unwrap_or("-"),
                "Backend is up"
            ),
            Err(e) => tracing::warn!(error = %e, "Backend health check failed"),
        }
    });
    let client = LoggingClient::new(http);

    match config.session_file {
        Some(path) => run(client, FileStore::new(path)).await?,
        None => run(client, MemoryStore::default()).await?,
    }

    Ok(())
}

async fn run<C: AskClient, S: SessionStore>(client: C, store: S) -> std::io::Result<()> {
    let mut form = Orchestrator::new(client, SessionManager::new(store));
    terminal::run(&mut form, tokio::io::stdin(), tokio::io::stdout()).await
}
